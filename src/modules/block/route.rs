use crate::modules::block::handle::*;
use actix_web::web::{ServiceConfig, scope};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/block")
            .service(block_user)
            .service(unblock_user)
            .service(list_blocked)
            .service(report_user),
    );
}

use crate::modules::matching::handle::*;
use actix_web::web::{ServiceConfig, scope};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/matching").service(get_matches).service(meet).service(pass));
}

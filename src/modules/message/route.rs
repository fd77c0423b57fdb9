use crate::modules::message::handle::*;
use actix_web::web::{ServiceConfig, scope};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/chat")
            .service(list_conversations)
            .service(get_conversation)
            .service(send_message)
            .service(mark_read),
    );
}

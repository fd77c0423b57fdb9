use crate::modules::user::handle::*;
use actix_web::web::{ServiceConfig, scope};

pub fn public_api_configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/auth").service(register).service(login).service(logout));
}

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(scope("/profile").service(get_me).service(update_me).service(get_profile));
}

use crate::modules::lesson::handle::*;
use actix_web::web::{ServiceConfig, scope};

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(
        scope("/lessons")
            .service(list_lessons)
            .service(create_lesson)
            .service(list_for_student)
            .service(list_for_teacher)
            .service(get_lesson)
            .service(update_lesson)
            .service(delete_lesson),
    );
}

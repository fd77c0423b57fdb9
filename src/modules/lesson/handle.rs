use actix_web::{HttpRequest, delete, get, post, put, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::lesson::{
        model::{CreateLessonModel, DataEnvelope, UpdateLessonModel},
        repository_pg::LessonRepositoryPg,
        schema::LessonEntity,
        service::LessonService,
    },
    utils::{Claims, ValidatedJson},
};

pub type LessonSvc = LessonService<LessonRepositoryPg>;

type LessonResult = Result<success::Success<DataEnvelope<LessonEntity>>, error::Error>;
type LessonsResult = Result<success::Success<DataEnvelope<Vec<LessonEntity>>>, error::Error>;

#[get("")]
pub async fn list_lessons(lesson_service: web::Data<LessonSvc>) -> LessonsResult {
    let data = lesson_service.list_lessons().await?;
    Ok(success::Success::ok(Some(DataEnvelope { data })))
}

#[post("")]
pub async fn create_lesson(
    lesson_service: web::Data<LessonSvc>,
    body: ValidatedJson<CreateLessonModel>,
    req: HttpRequest,
) -> LessonResult {
    let teacher_id = get_extensions::<Claims>(&req)?.sub;
    let data = lesson_service.create_lesson(teacher_id, body.0).await?;
    Ok(success::Success::created(Some(DataEnvelope { data })))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_lesson(lesson_service: web::Data<LessonSvc>, id: web::Path<Uuid>) -> LessonResult {
    let data = lesson_service.get_lesson(*id).await?;
    Ok(success::Success::ok(Some(DataEnvelope { data })))
}

#[put("/{id:[0-9a-fA-F-]{36}}")]
pub async fn update_lesson(
    lesson_service: web::Data<LessonSvc>,
    id: web::Path<Uuid>,
    body: ValidatedJson<UpdateLessonModel>,
    req: HttpRequest,
) -> LessonResult {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let data = lesson_service.update_lesson(user_id, *id, body.0).await?;
    Ok(success::Success::ok(Some(DataEnvelope { data })))
}

#[delete("/{id:[0-9a-fA-F-]{36}}")]
pub async fn delete_lesson(
    lesson_service: web::Data<LessonSvc>,
    id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    lesson_service.delete_lesson(user_id, *id).await?;
    Ok(success::Success::ok(None).message("Lesson deleted"))
}

#[get("/student/{student_id}")]
pub async fn list_for_student(
    lesson_service: web::Data<LessonSvc>,
    student_id: web::Path<Uuid>,
) -> LessonsResult {
    let data = lesson_service.list_for_student(*student_id).await?;
    Ok(success::Success::ok(Some(DataEnvelope { data })))
}

#[get("/teacher/{teacher_id}")]
pub async fn list_for_teacher(
    lesson_service: web::Data<LessonSvc>,
    teacher_id: web::Path<Uuid>,
) -> LessonsResult {
    let data = lesson_service.list_for_teacher(*teacher_id).await?;
    Ok(success::Success::ok(Some(DataEnvelope { data })))
}

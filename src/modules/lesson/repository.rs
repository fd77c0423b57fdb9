use uuid::Uuid;

use crate::api::error;
use crate::modules::lesson::model::{InsertLesson, UpdateLessonModel};
use crate::modules::lesson::schema::LessonEntity;

#[async_trait::async_trait]
pub trait LessonRepository {
    async fn find_all(&self) -> Result<Vec<LessonEntity>, error::SystemError>;
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<LessonEntity>, error::SystemError>;
    async fn create(&self, lesson: &InsertLesson) -> Result<LessonEntity, error::SystemError>;
    async fn update(
        &self,
        id: &Uuid,
        lesson: &UpdateLessonModel,
    ) -> Result<Option<LessonEntity>, error::SystemError>;
    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError>;
    async fn find_by_student(
        &self,
        student_id: &Uuid,
    ) -> Result<Vec<LessonEntity>, error::SystemError>;
    async fn find_by_teacher(
        &self,
        teacher_id: &Uuid,
    ) -> Result<Vec<LessonEntity>, error::SystemError>;
}

use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    modules::lesson::{
        model::{CreateLessonModel, InsertLesson, UpdateLessonModel},
        repository::LessonRepository,
        schema::LessonEntity,
    },
};

#[derive(Clone)]
pub struct LessonService<L>
where
    L: LessonRepository + Send + Sync,
{
    lesson_repo: Arc<L>,
}

impl<L> LessonService<L>
where
    L: LessonRepository + Send + Sync,
{
    pub fn with_dependencies(lesson_repo: Arc<L>) -> Self {
        LessonService { lesson_repo }
    }

    pub async fn list_lessons(&self) -> Result<Vec<LessonEntity>, error::SystemError> {
        self.lesson_repo.find_all().await
    }

    pub async fn get_lesson(&self, id: Uuid) -> Result<LessonEntity, error::SystemError> {
        self.lesson_repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Lesson not found"))
    }

    /// The caller becomes the lesson's teacher.
    pub async fn create_lesson(
        &self,
        teacher_id: Uuid,
        lesson: CreateLessonModel,
    ) -> Result<LessonEntity, error::SystemError> {
        let lesson = self.lesson_repo.create(&InsertLesson::from_model(teacher_id, lesson)).await?;
        info!("Lesson {} created by {}", lesson.id, teacher_id);
        Ok(lesson)
    }

    async fn owned_lesson(&self, user_id: Uuid, id: Uuid) -> Result<LessonEntity, error::SystemError> {
        let lesson = self.get_lesson(id).await?;
        if lesson.teacher_id != user_id {
            return Err(error::SystemError::forbidden("Not authorized"));
        }
        Ok(lesson)
    }

    pub async fn update_lesson(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: UpdateLessonModel,
    ) -> Result<LessonEntity, error::SystemError> {
        self.owned_lesson(user_id, id).await?;
        self.lesson_repo
            .update(&id, &update)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Lesson not found"))
    }

    pub async fn delete_lesson(&self, user_id: Uuid, id: Uuid) -> Result<(), error::SystemError> {
        self.owned_lesson(user_id, id).await?;
        if !self.lesson_repo.delete(&id).await? {
            return Err(error::SystemError::not_found("Lesson not found"));
        }
        Ok(())
    }

    pub async fn list_for_student(
        &self,
        student_id: Uuid,
    ) -> Result<Vec<LessonEntity>, error::SystemError> {
        self.lesson_repo.find_by_student(&student_id).await
    }

    pub async fn list_for_teacher(
        &self,
        teacher_id: Uuid,
    ) -> Result<Vec<LessonEntity>, error::SystemError> {
        self.lesson_repo.find_by_teacher(&teacher_id).await
    }
}

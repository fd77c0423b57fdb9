use uuid::Uuid;

use crate::{
    api::error,
    modules::lesson::{
        model::{InsertLesson, UpdateLessonModel},
        repository::LessonRepository,
        schema::LessonEntity,
    },
};

#[derive(Clone)]
pub struct LessonRepositoryPg {
    pool: sqlx::PgPool,
}

impl LessonRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl LessonRepository for LessonRepositoryPg {
    async fn find_all(&self) -> Result<Vec<LessonEntity>, error::SystemError> {
        let lessons = sqlx::query_as::<_, LessonEntity>("SELECT * FROM lessons ORDER BY date ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(lessons)
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<LessonEntity>, error::SystemError> {
        let lesson = sqlx::query_as::<_, LessonEntity>("SELECT * FROM lessons WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(lesson)
    }

    async fn create(&self, lesson: &InsertLesson) -> Result<LessonEntity, error::SystemError> {
        let lesson = sqlx::query_as::<_, LessonEntity>(
            r#"
            INSERT INTO lessons (
                id, teacher_id, student_ids, date, location, description, downloadable_url, status
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(lesson.teacher_id)
        .bind(&lesson.student_ids)
        .bind(lesson.date)
        .bind(&lesson.location)
        .bind(&lesson.description)
        .bind(&lesson.downloadable_url)
        .bind(lesson.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(lesson)
    }

    async fn update(
        &self,
        id: &Uuid,
        lesson: &UpdateLessonModel,
    ) -> Result<Option<LessonEntity>, error::SystemError> {
        let lesson = sqlx::query_as::<_, LessonEntity>(
            r#"
        UPDATE lessons
        SET
            student_ids      = COALESCE($2, student_ids),
            date             = COALESCE($3, date),
            location         = COALESCE($4, location),
            description      = COALESCE($5, description),
            downloadable_url = CASE WHEN $6::boolean THEN $7 ELSE downloadable_url END,
            status           = COALESCE($8, status)
        WHERE id = $1
        RETURNING *
        "#,
        )
        .bind(id)
        .bind(&lesson.student_ids)
        .bind(lesson.date)
        .bind(&lesson.location)
        .bind(&lesson.description)
        .bind(lesson.downloadable_url.is_some())
        .bind(lesson.downloadable_url.as_ref().and_then(|v| v.as_ref()))
        .bind(lesson.status)
        .fetch_optional(&self.pool)
        .await?;
        Ok(lesson)
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let result = sqlx::query("DELETE FROM lessons WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_student(
        &self,
        student_id: &Uuid,
    ) -> Result<Vec<LessonEntity>, error::SystemError> {
        let lessons = sqlx::query_as::<_, LessonEntity>(
            "SELECT * FROM lessons WHERE $1 = ANY(student_ids) ORDER BY date ASC",
        )
        .bind(student_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lessons)
    }

    async fn find_by_teacher(
        &self,
        teacher_id: &Uuid,
    ) -> Result<Vec<LessonEntity>, error::SystemError> {
        let lessons = sqlx::query_as::<_, LessonEntity>(
            "SELECT * FROM lessons WHERE teacher_id = $1 ORDER BY date ASC",
        )
        .bind(teacher_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(lessons)
    }
}

use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, Type, Serialize, Deserialize)]
#[sqlx(type_name = "lesson_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LessonStatus {
    Past,
    Booked,
    #[default]
    Available,
}

#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LessonEntity {
    pub id: Uuid,
    pub teacher_id: Uuid,
    pub student_ids: Vec<Uuid>,
    pub date: chrono::DateTime<chrono::Utc>,
    pub location: String,
    pub description: String,
    pub downloadable_url: Option<String>,
    pub status: LessonStatus,
}

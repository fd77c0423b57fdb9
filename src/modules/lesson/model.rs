use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::lesson::schema::LessonStatus;
use crate::utils::double_option;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonModel {
    #[serde(default)]
    pub student_ids: Vec<Uuid>,
    pub date: chrono::DateTime<chrono::Utc>,
    #[validate(length(min = 1, message = "Location is required"))]
    pub location: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub downloadable_url: Option<String>,
    pub status: Option<LessonStatus>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonModel {
    pub student_ids: Option<Vec<Uuid>>,
    pub date: Option<chrono::DateTime<chrono::Utc>>,
    #[validate(length(min = 1, message = "Location cannot be empty"))]
    pub location: Option<String>,
    #[validate(length(min = 1, message = "Description cannot be empty"))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub downloadable_url: Option<Option<String>>,
    pub status: Option<LessonStatus>,
}

pub struct InsertLesson {
    pub teacher_id: Uuid,
    pub student_ids: Vec<Uuid>,
    pub date: chrono::DateTime<chrono::Utc>,
    pub location: String,
    pub description: String,
    pub downloadable_url: Option<String>,
    pub status: LessonStatus,
}

impl InsertLesson {
    pub fn from_model(teacher_id: Uuid, model: CreateLessonModel) -> Self {
        InsertLesson {
            teacher_id,
            student_ids: model.student_ids,
            date: model.date,
            location: model.location,
            description: model.description,
            downloadable_url: model.downloadable_url,
            status: model.status.unwrap_or_default(),
        }
    }
}

/// Lesson payloads go out under `data`.
#[derive(Debug, Clone, Serialize)]
pub struct DataEnvelope<T: Serialize> {
    pub data: T,
}

use serde::{Deserialize, Serialize};
use sqlx::prelude::{FromRow, Type};
use uuid::Uuid;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Type, Serialize, Deserialize)]
#[sqlx(type_name = "looking_for")]
pub enum LookingFor {
    Friendship,
    Networking,
    Support,
}

#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: Uuid,
    pub email: String,
    pub hash_password: String,
    pub first_name: String,
    pub last_name: String,
    pub home_country: String,
    pub current_province: String,
    pub current_country: String,
    pub languages: Vec<String>,
    pub interests: Vec<String>,
    pub looking_for: Vec<LookingFor>,
    pub photo: Option<String>,
    pub profile_complete: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl UserEntity {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

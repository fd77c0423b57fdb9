use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::block::schema::BlockEntity;
use crate::modules::user::model::CurrentLocation;

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BlockModel {
    pub user_id: Uuid,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReportModel {
    pub user_id: Uuid,
    #[validate(length(min = 1, message = "Reason is required"))]
    pub reason: String,
}

#[derive(Debug, Clone, FromRow)]
pub struct BlockedUserRow {
    pub block_id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub current_province: String,
    pub current_country: String,
    pub blocked_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedUser {
    pub id: Uuid,
    pub user_id: Uuid,
    pub first_name: String,
    pub current_location: CurrentLocation,
    pub blocked_at: chrono::DateTime<chrono::Utc>,
}

impl From<BlockedUserRow> for BlockedUser {
    fn from(row: BlockedUserRow) -> Self {
        BlockedUser {
            id: row.block_id,
            user_id: row.user_id,
            first_name: row.first_name,
            current_location: CurrentLocation {
                province: row.current_province,
                country: row.current_country,
            },
            blocked_at: row.blocked_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BlockEnvelope {
    pub block: BlockEntity,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockedUsersEnvelope {
    pub blocked_users: Vec<BlockedUser>,
}

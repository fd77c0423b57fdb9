use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageEntity {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Name subset of a sender or receiver. Messages only flow between connected
/// users, so the last name is visible here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageParticipant {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
}

/// A message as clients receive it: the stored row plus both participants.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MessageWithUsers {
    #[serde(flatten)]
    pub message: MessageEntity,
    pub sender: MessageParticipant,
    pub receiver: MessageParticipant,
}

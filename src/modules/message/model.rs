use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::message::schema::{MessageEntity, MessageParticipant, MessageWithUsers};
use crate::modules::user::model::CurrentLocation;

#[derive(Debug, Clone)]
pub struct InsertMessage {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageModel {
    pub receiver_id: Uuid,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadModel {
    pub sender_id: Uuid,
}

/// A message joined with both participants' names.
#[derive(Debug, Clone, FromRow)]
pub struct MessageWithUsersRow {
    #[sqlx(flatten)]
    pub message: MessageEntity,
    pub sender_first_name: String,
    pub sender_last_name: String,
    pub receiver_first_name: String,
    pub receiver_last_name: String,
}

impl From<MessageWithUsersRow> for MessageWithUsers {
    fn from(row: MessageWithUsersRow) -> Self {
        MessageWithUsers {
            sender: MessageParticipant {
                id: row.message.sender_id,
                first_name: row.sender_first_name,
                last_name: row.sender_last_name,
            },
            receiver: MessageParticipant {
                id: row.message.receiver_id,
                first_name: row.receiver_first_name,
                last_name: row.receiver_last_name,
            },
            message: row.message,
        }
    }
}

/// One row per connected peer, with the latest message of the pair if any.
#[derive(Debug, Clone, FromRow)]
pub struct ConversationSummaryRow {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub photo: Option<String>,
    pub current_province: String,
    pub current_country: String,
    pub last_message_id: Option<Uuid>,
    pub last_sender_id: Option<Uuid>,
    pub last_receiver_id: Option<Uuid>,
    pub last_content: Option<String>,
    pub last_is_read: Option<bool>,
    pub last_created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub unread_count: i64,
}

impl ConversationSummaryRow {
    fn last_message(&self) -> Option<MessageEntity> {
        Some(MessageEntity {
            id: self.last_message_id?,
            sender_id: self.last_sender_id?,
            receiver_id: self.last_receiver_id?,
            content: self.last_content.clone()?,
            is_read: self.last_is_read?,
            created_at: self.last_created_at?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationPeer {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub photo: Option<String>,
    pub current_location: CurrentLocation,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversationSummary {
    pub user: ConversationPeer,
    pub last_message: Option<MessageEntity>,
    pub unread_count: i64,
}

impl From<ConversationSummaryRow> for ConversationSummary {
    fn from(row: ConversationSummaryRow) -> Self {
        let last_message = row.last_message();
        ConversationSummary {
            user: ConversationPeer {
                id: row.user_id,
                first_name: row.first_name,
                last_name: row.last_name,
                photo: row.photo,
                current_location: CurrentLocation {
                    province: row.current_province,
                    country: row.current_country,
                },
            },
            last_message,
            unread_count: row.unread_count,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConversationsEnvelope {
    pub conversations: Vec<ConversationSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessagesEnvelope {
    pub messages: Vec<MessageWithUsers>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageEnvelope {
    pub message: MessageWithUsers,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdatedEnvelope {
    pub updated: u64,
}

use uuid::Uuid;

use crate::api::error;
use crate::modules::message::model::{ConversationSummaryRow, InsertMessage};
use crate::modules::message::schema::MessageWithUsers;

#[async_trait::async_trait]
pub trait MessageRepository {
    async fn create(
        &self,
        message: &InsertMessage,
    ) -> Result<MessageWithUsers, error::SystemError>;

    /// Every message exchanged by the pair, oldest first.
    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Vec<MessageWithUsers>, error::SystemError>;

    /// Flags unread messages from `sender_id` to `receiver_id` as read and
    /// returns how many changed.
    async fn mark_read(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<u64, error::SystemError>;

    async fn find_conversation_summaries(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationSummaryRow>, error::SystemError>;
}

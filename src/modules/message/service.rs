use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::connection::repository::ConnectionRepository;
use crate::modules::message::model::{ConversationSummary, InsertMessage};
use crate::modules::message::repository::MessageRepository;
use crate::modules::message::schema::MessageWithUsers;
use crate::modules::websocket::message::ServerMessage;
use crate::modules::websocket::server::UserNotifier;

#[derive(Clone)]
pub struct MessageService<M, C>
where
    M: MessageRepository + Send + Sync,
    C: ConnectionRepository + Send + Sync,
{
    message_repo: Arc<M>,
    connection_repo: Arc<C>,
    notifier: Arc<dyn UserNotifier>,
}

impl<M, C> MessageService<M, C>
where
    M: MessageRepository + Send + Sync,
    C: ConnectionRepository + Send + Sync,
{
    pub fn with_dependencies(
        message_repo: Arc<M>,
        connection_repo: Arc<C>,
        notifier: Arc<dyn UserNotifier>,
    ) -> Self {
        MessageService { message_repo, connection_repo, notifier }
    }

    async fn ensure_connected(&self, user_id: &Uuid, peer_id: &Uuid) -> Result<(), error::SystemError> {
        if self.connection_repo.find_connection(user_id, peer_id).await?.is_none() {
            return Err(error::SystemError::forbidden("Can only message connected users"));
        }
        Ok(())
    }

    /// Persists the message and pushes it to the receiver's live sessions.
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: &str,
    ) -> Result<MessageWithUsers, error::SystemError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Message cannot be empty"));
        }

        self.ensure_connected(&sender_id, &receiver_id).await?;

        let message = self
            .message_repo
            .create(&InsertMessage { sender_id, receiver_id, content: content.to_string() })
            .await?;

        self.notifier.notify(receiver_id, ServerMessage::NewMessage(message.clone()));

        Ok(message)
    }

    /// Reading a conversation marks what the peer sent as read first.
    pub async fn list_conversation(
        &self,
        reader_id: Uuid,
        peer_id: Uuid,
    ) -> Result<Vec<MessageWithUsers>, error::SystemError> {
        self.ensure_connected(&reader_id, &peer_id).await?;

        let updated = self.message_repo.mark_read(&peer_id, &reader_id).await?;
        if updated > 0 {
            self.notifier.notify(peer_id, ServerMessage::MessagesRead { read_by: reader_id });
        }

        self.message_repo.find_between(&reader_id, &peer_id).await
    }

    pub async fn mark_read(&self, reader_id: Uuid, sender_id: Uuid) -> Result<u64, error::SystemError> {
        let updated = self.message_repo.mark_read(&sender_id, &reader_id).await?;
        self.notifier.notify(sender_id, ServerMessage::MessagesRead { read_by: reader_id });
        Ok(updated)
    }

    pub async fn list_conversations(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, error::SystemError> {
        let rows = self.message_repo.find_conversation_summaries(&user_id).await?;

        let mut summaries: Vec<ConversationSummary> =
            rows.into_iter().map(ConversationSummary::from).collect();
        // newest conversation first, peers without messages at the end
        summaries.sort_by(|a, b| {
            let a = a.last_message.as_ref().map(|m| m.created_at);
            let b = b.last_message.as_ref().map(|m| m.created_at);
            b.cmp(&a)
        });

        Ok(summaries)
    }
}

//! Frames exchanged over `/ws`: `{"event": <name>, "data": <payload>}`.
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::modules::message::schema::MessageWithUsers;

/// Frames sent by the client.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum ClientMessage {
    #[serde(rename = "chat:send_message", rename_all = "camelCase")]
    SendMessage {
        receiver_id: Uuid,
        content: String,
        /// Echoed back untouched in the matching `chat:ack`.
        #[serde(default)]
        ack_id: Option<serde_json::Value>,
    },

    #[serde(rename = "chat:typing_start", rename_all = "camelCase")]
    TypingStart { receiver_id: Uuid },

    #[serde(rename = "chat:typing_stop", rename_all = "camelCase")]
    TypingStop { receiver_id: Uuid },

    #[serde(rename = "chat:mark_read", rename_all = "camelCase")]
    MarkRead { sender_id: Uuid },

    #[serde(rename = "ping")]
    Ping,
}

/// Frames pushed by the server.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum ServerMessage {
    #[serde(rename = "chat:new_message")]
    NewMessage(MessageWithUsers),

    #[serde(rename = "chat:user_typing", rename_all = "camelCase")]
    UserTyping { user_id: Uuid, is_typing: bool },

    #[serde(rename = "chat:messages_read", rename_all = "camelCase")]
    MessagesRead { read_by: Uuid },

    #[serde(rename = "chat:ack", rename_all = "camelCase")]
    Ack {
        ack_id: Option<serde_json::Value>,
        success: bool,
        #[serde(skip_serializing_if = "Option::is_none")]
        message: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        data: Option<MessageWithUsers>,
    },

    #[serde(rename = "pong")]
    Pong,

    #[serde(rename = "error")]
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_message_frame() {
        let receiver = Uuid::now_v7();
        let frame = json!({
            "event": "chat:send_message",
            "data": {"receiverId": receiver, "content": "salut", "ackId": "a-1"}
        });

        let msg: ClientMessage = serde_json::from_value(frame).unwrap();
        assert_eq!(
            msg,
            ClientMessage::SendMessage {
                receiver_id: receiver,
                content: "salut".to_string(),
                ack_id: Some(json!("a-1")),
            }
        );
    }

    #[test]
    fn test_send_message_ack_id_is_optional() {
        let frame = json!({
            "event": "chat:send_message",
            "data": {"receiverId": Uuid::now_v7(), "content": "salut"}
        });
        let msg: ClientMessage = serde_json::from_value(frame).unwrap();
        assert!(matches!(msg, ClientMessage::SendMessage { ack_id: None, .. }));
    }

    #[test]
    fn test_typing_and_read_frames() {
        let id = Uuid::now_v7();
        let start: ClientMessage =
            serde_json::from_value(json!({"event": "chat:typing_start", "data": {"receiverId": id}}))
                .unwrap();
        assert_eq!(start, ClientMessage::TypingStart { receiver_id: id });

        let read: ClientMessage =
            serde_json::from_value(json!({"event": "chat:mark_read", "data": {"senderId": id}}))
                .unwrap();
        assert_eq!(read, ClientMessage::MarkRead { sender_id: id });

        let ping: ClientMessage = serde_json::from_value(json!({"event": "ping"})).unwrap();
        assert_eq!(ping, ClientMessage::Ping);
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        let frame = json!({"event": "chat:delete_everything", "data": {}});
        assert!(serde_json::from_value::<ClientMessage>(frame).is_err());
    }

    #[test]
    fn test_server_frames_shape() {
        let user = Uuid::now_v7();

        let typing = serde_json::to_value(ServerMessage::UserTyping { user_id: user, is_typing: true })
            .unwrap();
        assert_eq!(
            typing,
            json!({"event": "chat:user_typing", "data": {"userId": user, "isTyping": true}})
        );

        let read = serde_json::to_value(ServerMessage::MessagesRead { read_by: user }).unwrap();
        assert_eq!(read, json!({"event": "chat:messages_read", "data": {"readBy": user}}));

        let pong = serde_json::to_value(ServerMessage::Pong).unwrap();
        assert_eq!(pong["event"], "pong");
    }

    #[test]
    fn test_failed_ack_carries_reason_only() {
        let ack = ServerMessage::Ack {
            ack_id: Some(json!(7)),
            success: false,
            message: Some("Can only message connected users".to_string()),
            data: None,
        };
        assert_eq!(
            serde_json::to_value(ack).unwrap(),
            json!({
                "event": "chat:ack",
                "data": {"ackId": 7, "success": false, "message": "Can only message connected users"}
            })
        );
    }

    #[test]
    fn test_new_message_payload_is_the_message() {
        use crate::modules::message::schema::{MessageEntity, MessageParticipant};

        let sender = MessageParticipant {
            id: Uuid::now_v7(),
            first_name: "Ana".to_string(),
            last_name: "Silva".to_string(),
        };
        let receiver = MessageParticipant {
            id: Uuid::now_v7(),
            first_name: "Bob".to_string(),
            last_name: "Tester".to_string(),
        };
        let message = MessageWithUsers {
            message: MessageEntity {
                id: Uuid::now_v7(),
                sender_id: sender.id,
                receiver_id: receiver.id,
                content: "salut".to_string(),
                is_read: false,
                created_at: chrono::Utc::now(),
            },
            sender,
            receiver,
        };
        let json = serde_json::to_value(ServerMessage::NewMessage(message.clone())).unwrap();
        assert_eq!(json["event"], "chat:new_message");
        assert_eq!(json["data"]["content"], "salut");
        assert_eq!(json["data"]["senderId"], json!(message.sender.id));
        assert_eq!(json["data"]["sender"]["firstName"], "Ana");
        assert_eq!(json["data"]["receiver"]["firstName"], "Bob");
    }
}

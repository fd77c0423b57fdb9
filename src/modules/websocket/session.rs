//! One actor per socket. Frames to the client go out through the channel
//! drained by the loop in `handler.rs`.
//!
//! Database work (send, mark read) runs through `ctx.spawn()` + `into_actor()`
//! so the actor keeps handling frames while a query is in flight.
use actix::prelude::*;
use actix_web::web;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::modules::{
    connection::repository::ConnectionRepository,
    message::{repository::MessageRepository, service::MessageService},
};

use super::events::*;
use super::message::{ClientMessage, ServerMessage};
use super::server::WebSocketServer;

pub struct WebSocketSession<M, C>
where
    M: MessageRepository + Send + Sync + 'static,
    C: ConnectionRepository + Send + Sync + 'static,
{
    /// Registry key for this socket.
    pub id: Uuid,

    /// Verified from the token before the upgrade.
    pub user_id: Uuid,

    /// Registry actor, told on start and stop.
    pub server: Addr<WebSocketServer>,

    /// JSON frames for the client, written to the socket by the handler loop.
    pub tx: mpsc::UnboundedSender<String>,

    /// Same service the REST chat routes use.
    pub message_service: web::Data<MessageService<M, C>>,
}

impl<M, C> WebSocketSession<M, C>
where
    M: MessageRepository + Send + Sync + 'static,
    C: ConnectionRepository + Send + Sync + 'static,
{
    pub fn new(
        user_id: Uuid,
        server: Addr<WebSocketServer>,
        tx: mpsc::UnboundedSender<String>,
        message_service: web::Data<MessageService<M, C>>,
    ) -> Self {
        Self { id: Uuid::now_v7(), user_id, server, tx, message_service }
    }

    fn send_to_client(&self, msg: &ServerMessage) {
        match serde_json::to_string(msg) {
            Ok(json) => {
                if let Err(e) = self.tx.send(json) {
                    tracing::error!("Cannot reach client on session {}: {}", self.id, e);
                }
            }
            Err(e) => {
                tracing::error!("Cannot serialize frame for session {}: {}", self.id, e);
            }
        }
    }

    fn handle_client_message(&mut self, msg: ClientMessage, ctx: &mut Context<Self>) {
        match msg {
            ClientMessage::SendMessage { receiver_id, content, ack_id } => {
                self.handle_send_message(receiver_id, content, ack_id, ctx);
            }
            ClientMessage::TypingStart { receiver_id } => self.relay_typing(receiver_id, true),
            ClientMessage::TypingStop { receiver_id } => self.relay_typing(receiver_id, false),
            ClientMessage::MarkRead { sender_id } => self.handle_mark_read(sender_id, ctx),
            ClientMessage::Ping => self.send_to_client(&ServerMessage::Pong),
        }
    }

    /// Same path as the REST send; the outcome is acknowledged to this socket only.
    ///
    /// 1. The service checks content and connection, persists, then pushes
    ///    `chat:new_message` to the receiver through the registry.
    /// 2. This socket gets `chat:ack` with the stored message, or with the
    ///    client-facing error text.
    fn handle_send_message(
        &self,
        receiver_id: Uuid,
        content: String,
        ack_id: Option<serde_json::Value>,
        ctx: &mut Context<Self>,
    ) {
        let service = self.message_service.clone();
        let sender_id = self.user_id;

        ctx.spawn(
            async move { service.send_message(sender_id, receiver_id, &content).await }
                .into_actor(self)
                .map(move |result, act, _ctx| {
                    let ack = match result {
                        Ok(message) => ServerMessage::Ack {
                            ack_id,
                            success: true,
                            message: None,
                            data: Some(message),
                        },
                        Err(e) => {
                            tracing::warn!(
                                "Send from {} to {} failed: {}",
                                sender_id,
                                receiver_id,
                                e
                            );
                            ServerMessage::Ack {
                                ack_id,
                                success: false,
                                message: Some(e.client_message().into_owned()),
                                data: None,
                            }
                        }
                    };
                    act.send_to_client(&ack);
                }),
        );
    }

    /// Typing state is relayed as is, nothing is stored.
    fn relay_typing(&self, receiver_id: Uuid, is_typing: bool) {
        self.server.do_send(SendToUser {
            user_id: receiver_id,
            message: ServerMessage::UserTyping { user_id: self.user_id, is_typing },
        });
    }

    /// The service tells the original sender (`chat:messages_read`); only a
    /// failure is reported back here.
    fn handle_mark_read(&self, sender_id: Uuid, ctx: &mut Context<Self>) {
        let service = self.message_service.clone();
        let reader_id = self.user_id;

        ctx.spawn(
            async move { service.mark_read(reader_id, sender_id).await }.into_actor(self).map(
                |result, act, _ctx| {
                    if let Err(e) = result {
                        tracing::warn!("Mark read failed on session {}: {}", act.id, e);
                        act.send_to_client(&ServerMessage::Error {
                            message: e.client_message().into_owned(),
                        });
                    }
                },
            ),
        );
    }
}

impl<M, C> Actor for WebSocketSession<M, C>
where
    M: MessageRepository + Send + Sync + 'static,
    C: ConnectionRepository + Send + Sync + 'static,
{
    type Context = Context<Self>;

    /// Registers with the server so frames for this user reach the socket.
    fn started(&mut self, ctx: &mut Self::Context) {
        tracing::debug!("WebSocket session started: {}", self.id);
        self.server.do_send(Connect {
            id: self.id,
            user_id: self.user_id,
            addr: ctx.address().recipient(),
        });
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::debug!("WebSocket session stopped: {}", self.id);
        self.server.do_send(Disconnect { id: self.id, user_id: self.user_id });
    }
}

impl Message for ClientMessage {
    type Result = ();
}

/// Frames parsed by the handler loop.
impl<M, C> Handler<ClientMessage> for WebSocketSession<M, C>
where
    M: MessageRepository + Send + Sync + 'static,
    C: ConnectionRepository + Send + Sync + 'static,
{
    type Result = ();

    fn handle(&mut self, msg: ClientMessage, ctx: &mut Context<Self>) {
        self.handle_client_message(msg, ctx);
    }
}

/// Frames routed by the registry for this user.
impl<M, C> Handler<ServerMessage> for WebSocketSession<M, C>
where
    M: MessageRepository + Send + Sync + 'static,
    C: ConnectionRepository + Send + Sync + 'static,
{
    type Result = ();

    fn handle(&mut self, msg: ServerMessage, _ctx: &mut Context<Self>) {
        self.send_to_client(&msg);
    }
}

impl<M, C> Handler<CloseSession> for WebSocketSession<M, C>
where
    M: MessageRepository + Send + Sync + 'static,
    C: ConnectionRepository + Send + Sync + 'static,
{
    type Result = ();

    fn handle(&mut self, _: CloseSession, ctx: &mut Context<Self>) {
        ctx.stop();
    }
}

//! Messages passed between the session actors and the registry actor.
use actix::prelude::*;
use uuid::Uuid;

use super::message::ServerMessage;

/// A socket for `user_id` came up.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Connect {
    /// Session id, unique per socket.
    pub id: Uuid,
    /// Owner of the socket, taken from the verified token.
    pub user_id: Uuid,
    /// Where frames for this session are delivered.
    pub addr: Recipient<ServerMessage>,
}

/// The session actor stopped.
#[derive(Message)]
#[rtype(result = "()")]
pub struct Disconnect {
    pub id: Uuid,
    pub user_id: Uuid,
}

/// Fan a frame out to every live session of one user.
#[derive(Message)]
#[rtype(result = "()")]
pub struct SendToUser {
    /// Target user; dropped when they have no session.
    pub user_id: Uuid,
    pub message: ServerMessage,
}

/// The socket loop ended; the session actor should stop.
#[derive(Message)]
#[rtype(result = "()")]
pub struct CloseSession;

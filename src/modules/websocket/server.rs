//! Registry actor: which sessions belong to which user.
use actix::prelude::*;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use super::events::*;
use super::message::ServerMessage;

/// Pushes real-time frames to a user's live sessions. Delivery is best effort.
pub trait UserNotifier: Send + Sync {
    fn notify(&self, user_id: Uuid, message: ServerMessage);
}

impl UserNotifier for Addr<WebSocketServer> {
    fn notify(&self, user_id: Uuid, message: ServerMessage) {
        self.do_send(SendToUser { user_id, message });
    }
}

/// Bookkeeping behind `WebSocketServer`, kept apart from the actor so it can
/// be tested without a runtime. `T` is the delivery handle.
pub struct SessionRegistry<T> {
    /// session id -> handle
    sessions: HashMap<Uuid, T>,

    /// user id -> session ids. A user may hold several sessions
    /// (phone, laptop), each gets every frame.
    users: HashMap<Uuid, HashSet<Uuid>>,
}

impl<T> SessionRegistry<T> {
    pub fn new() -> Self {
        Self { sessions: HashMap::new(), users: HashMap::new() }
    }

    /// Returns how many sessions the user now has.
    pub fn insert(&mut self, session_id: Uuid, user_id: Uuid, handle: T) -> usize {
        self.sessions.insert(session_id, handle);
        let sessions = self.users.entry(user_id).or_default();
        sessions.insert(session_id);
        sessions.len()
    }

    /// Returns true when this was the user's last session.
    pub fn remove(&mut self, session_id: &Uuid, user_id: &Uuid) -> bool {
        self.sessions.remove(session_id);

        let Some(sessions) = self.users.get_mut(user_id) else {
            return false;
        };
        sessions.remove(session_id);
        if sessions.is_empty() {
            self.users.remove(user_id);
            return true;
        }
        false
    }

    /// Handles of every live session of the user, empty when offline.
    pub fn sessions_of<'a>(&'a self, user_id: &Uuid) -> impl Iterator<Item = &'a T> + 'a {
        self.users
            .get(user_id)
            .into_iter()
            .flatten()
            .filter_map(|session_id| self.sessions.get(session_id))
    }

    pub fn is_online(&self, user_id: &Uuid) -> bool {
        self.users.contains_key(user_id)
    }
}

impl<T> Default for SessionRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Routes frames to users. Started once in `main` and shared by every
/// session and by the services through `UserNotifier`.
#[derive(Default)]
pub struct WebSocketServer {
    /// Live sessions, keyed by session and by user.
    registry: SessionRegistry<Recipient<ServerMessage>>,
}

impl WebSocketServer {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Actor for WebSocketServer {
    type Context = Context<Self>;

    fn started(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("WebSocket server started");
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        tracing::info!("WebSocket server stopped");
    }
}

impl Handler<Connect> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: Connect, _: &mut Context<Self>) {
        let count = self.registry.insert(msg.id, msg.user_id, msg.addr);
        tracing::info!("User {} connected on session {} ({} active)", msg.user_id, msg.id, count);
    }
}

impl Handler<Disconnect> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: Disconnect, _: &mut Context<Self>) {
        if self.registry.remove(&msg.id, &msg.user_id) {
            tracing::info!("User {} has no sessions left", msg.user_id);
        } else {
            tracing::debug!("Session {} of user {} closed", msg.id, msg.user_id);
        }
    }
}

/// Copies the frame to each session of the user.
impl Handler<SendToUser> for WebSocketServer {
    type Result = ();

    fn handle(&mut self, msg: SendToUser, _: &mut Context<Self>) {
        // offline users simply miss the frame, REST history has it
        if !self.registry.is_online(&msg.user_id) {
            tracing::debug!("User {} not online, frame dropped", msg.user_id);
            return;
        }

        let mut sent = 0;
        for recipient in self.registry.sessions_of(&msg.user_id) {
            recipient.do_send(msg.message.clone());
            sent += 1;
        }
        tracing::debug!("Sent frame to user {} ({} sessions)", msg.user_id, sent);
    }
}

impl Message for ServerMessage {
    type Result = ();
}

//! Test support: in-memory stand-ins for the Postgres repositories used by the
//! service tests, plus fixtures for the `#[sqlx::test]` repository tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

use crate::api::error::{self, DbErrorMeta};
use crate::modules::block::{
    model::BlockedUserRow, repository::BlockRepository, schema::BlockEntity,
};
use crate::modules::connection::{
    model::PendingRequestRow,
    repository::{ConnectionRepo, ConnectionRepository, ConnectionRequestRepository},
    schema::{ConnectionEntity, ConnectionRequestEntity, RequestStatus, ordered_pair},
};
use crate::modules::lesson::{
    model::{InsertLesson, UpdateLessonModel},
    repository::LessonRepository,
    schema::LessonEntity,
};
use crate::modules::matching::repository::MatchingRepository;
use crate::modules::message::{
    model::{ConversationSummaryRow, InsertMessage},
    repository::MessageRepository,
    schema::{MessageEntity, MessageParticipant, MessageWithUsers},
};
use crate::modules::user::{
    model::{CurrentLocation, InsertUser, RegisterModel, UpdateUser},
    repository::UserRepository,
    repository_pg::UserRepositoryPg,
    schema::{LookingFor, UserEntity},
};
use crate::modules::websocket::{message::ServerMessage, server::UserNotifier};

pub const TEST_SECRET: &str = "test-secret";

pub fn register_model(email: &str, home_country: &str, current_country: &str) -> RegisterModel {
    RegisterModel {
        email: email.to_string(),
        password: "Passw0rd".to_string(),
        first_name: "Ana".to_string(),
        last_name: "Silva".to_string(),
        home_country: home_country.to_string(),
        current_location: CurrentLocation {
            province: "Quebec".to_string(),
            country: current_country.to_string(),
        },
        languages: vec!["French".to_string()],
        interests: vec![],
        looking_for: vec![LookingFor::Friendship],
        photo: None,
    }
}

fn conflict(constraint: &str) -> error::SystemError {
    error::SystemError::Conflict(Some(DbErrorMeta { constraint: Some(constraint.to_string()) }))
}

#[derive(Default)]
struct State {
    ticks: i64,
    users: Vec<UserEntity>,
    requests: Vec<ConnectionRequestEntity>,
    connections: Vec<ConnectionEntity>,
    blocks: Vec<BlockEntity>,
    messages: Vec<MessageEntity>,
    lessons: Vec<LessonEntity>,
}

impl State {
    /// Strictly increasing timestamps so ordering assertions are deterministic.
    fn now(&mut self, base: chrono::DateTime<chrono::Utc>) -> chrono::DateTime<chrono::Utc> {
        self.ticks += 1;
        base + chrono::Duration::seconds(self.ticks)
    }

    fn user(&self, id: &Uuid) -> Option<&UserEntity> {
        self.users.iter().find(|u| u.id == *id)
    }

    fn connection(&self, a: &Uuid, b: &Uuid) -> Option<&ConnectionEntity> {
        let (user_a, user_b) = ordered_pair(*a, *b);
        self.connections.iter().find(|c| c.user_a == user_a && c.user_b == user_b)
    }

    fn request_between(&self, a: &Uuid, b: &Uuid) -> Option<&ConnectionRequestEntity> {
        self.requests.iter().find(|r| {
            (r.sender_id == *a && r.receiver_id == *b) || (r.sender_id == *b && r.receiver_id == *a)
        })
    }

    fn blocked_between(&self, a: &Uuid, b: &Uuid) -> bool {
        self.blocks.iter().any(|bl| {
            (bl.blocker_id == *a && bl.blocked_id == *b)
                || (bl.blocker_id == *b && bl.blocked_id == *a)
        })
    }

    fn participant(&self, id: &Uuid) -> Result<MessageParticipant, error::SystemError> {
        let user = self.user(id).ok_or_else(|| error::SystemError::not_found("User not found"))?;
        Ok(MessageParticipant {
            id: user.id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        })
    }

    fn with_users(&self, message: &MessageEntity) -> Result<MessageWithUsers, error::SystemError> {
        Ok(MessageWithUsers {
            sender: self.participant(&message.sender_id)?,
            receiver: self.participant(&message.receiver_id)?,
            message: message.clone(),
        })
    }

    fn request_for_receiver(
        &mut self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<&mut ConnectionRequestEntity, error::SystemError> {
        let request = self
            .requests
            .iter_mut()
            .find(|r| r.id == *request_id)
            .ok_or_else(|| error::SystemError::not_found("Request not found"))?;
        request.ensure_actionable_by(user_id)?;
        Ok(request)
    }
}

pub struct MemoryStore {
    base: chrono::DateTime<chrono::Utc>,
    state: Mutex<State>,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self { base: chrono::Utc::now(), state: Mutex::new(State::default()) })
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap()
    }

    pub fn add_user(&self, first_name: &str, home_country: &str, current_country: &str) -> Uuid {
        let mut state = self.lock();
        let now = state.now(self.base);
        let id = Uuid::now_v7();
        state.users.push(UserEntity {
            id,
            email: format!("{}-{}@example.com", first_name.to_lowercase(), id),
            hash_password: "not-a-real-hash".to_string(),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            home_country: home_country.to_string(),
            current_province: "Quebec".to_string(),
            current_country: current_country.to_string(),
            languages: vec!["French".to_string()],
            interests: vec![],
            looking_for: vec![LookingFor::Friendship],
            photo: None,
            profile_complete: true,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn user(&self, id: Uuid) -> UserEntity {
        self.lock().user(&id).cloned().unwrap()
    }

    pub fn set_profile_complete(&self, id: Uuid, complete: bool) {
        let mut state = self.lock();
        if let Some(user) = state.users.iter_mut().find(|u| u.id == id) {
            user.profile_complete = complete;
        }
    }

    pub fn connect(&self, a: Uuid, b: Uuid) {
        let mut state = self.lock();
        let now = state.now(self.base);
        let (user_a, user_b) = ordered_pair(a, b);
        state.connections.push(ConnectionEntity { id: Uuid::now_v7(), user_a, user_b, created_at: now });
    }

    pub fn connection_count(&self) -> usize {
        self.lock().connections.len()
    }

    pub fn add_request(&self, sender_id: Uuid, receiver_id: Uuid) -> Uuid {
        let mut state = self.lock();
        let now = state.now(self.base);
        let id = Uuid::now_v7();
        state.requests.push(ConnectionRequestEntity {
            id,
            sender_id,
            receiver_id,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        });
        id
    }

    pub fn request(&self, id: Uuid) -> ConnectionRequestEntity {
        self.lock().requests.iter().find(|r| r.id == id).cloned().unwrap()
    }

    pub fn set_request_status(&self, id: Uuid, status: RequestStatus) {
        let mut state = self.lock();
        if let Some(request) = state.requests.iter_mut().find(|r| r.id == id) {
            request.status = status;
        }
    }

    pub fn block(&self, blocker_id: Uuid, blocked_id: Uuid) {
        let mut state = self.lock();
        let now = state.now(self.base);
        state.blocks.push(BlockEntity {
            id: Uuid::now_v7(),
            blocker_id,
            blocked_id,
            reason: None,
            created_at: now,
        });
    }

    pub fn message_count(&self) -> usize {
        self.lock().messages.len()
    }
}

#[async_trait::async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.lock().user(id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        Ok(self.lock().users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.email == user.email) {
            return Err(conflict("users_email_key"));
        }
        let now = state.now(self.base);
        let entity = UserEntity {
            id: Uuid::now_v7(),
            email: user.email.clone(),
            hash_password: user.hash_password.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            home_country: user.home_country.clone(),
            current_province: user.current_province.clone(),
            current_country: user.current_country.clone(),
            languages: user.languages.clone(),
            interests: user.interests.clone(),
            looking_for: user.looking_for.clone(),
            photo: user.photo.clone(),
            profile_complete: user.profile_complete,
            created_at: now,
            updated_at: now,
        };
        state.users.push(entity.clone());
        Ok(entity)
    }

    async fn update(&self, id: &Uuid, update: &UpdateUser) -> Result<UserEntity, error::SystemError> {
        let mut state = self.lock();
        let now = state.now(self.base);
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == *id)
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        if let Some(v) = &update.first_name {
            user.first_name = v.clone();
        }
        if let Some(v) = &update.last_name {
            user.last_name = v.clone();
        }
        if let Some(v) = &update.home_country {
            user.home_country = v.clone();
        }
        if let Some(v) = &update.current_province {
            user.current_province = v.clone();
        }
        if let Some(v) = &update.current_country {
            user.current_country = v.clone();
        }
        if let Some(v) = &update.languages {
            user.languages = v.clone();
        }
        if let Some(v) = &update.interests {
            user.interests = v.clone();
        }
        if let Some(v) = &update.looking_for {
            user.looking_for = v.clone();
        }
        if let Some(v) = &update.photo {
            user.photo = v.clone();
        }
        user.profile_complete = true;
        user.updated_at = now;

        Ok(user.clone())
    }
}

#[async_trait::async_trait]
impl ConnectionRepository for MemoryStore {
    async fn find_connection(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<ConnectionEntity>, error::SystemError> {
        Ok(self.lock().connection(user_id_a, user_id_b).cloned())
    }

    async fn find_connected_users(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let state = self.lock();
        let mut connections: Vec<_> = state
            .connections
            .iter()
            .filter(|c| c.user_a == *user_id || c.user_b == *user_id)
            .collect();
        connections.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(connections
            .into_iter()
            .filter_map(|c| {
                let peer = if c.user_a == *user_id { c.user_b } else { c.user_a };
                state.user(&peer).cloned()
            })
            .collect())
    }
}

#[async_trait::async_trait]
impl ConnectionRequestRepository for MemoryStore {
    async fn find_request_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<ConnectionRequestEntity>, error::SystemError> {
        Ok(self.lock().request_between(user_id_a, user_id_b).cloned())
    }

    async fn find_pending_requests_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<PendingRequestRow>, error::SystemError> {
        let state = self.lock();
        let mut rows: Vec<PendingRequestRow> = state
            .requests
            .iter()
            .filter(|r| r.receiver_id == *user_id && r.status == RequestStatus::Pending)
            .filter_map(|r| {
                state.user(&r.sender_id).map(|sender| PendingRequestRow {
                    request_id: r.id,
                    status: r.status,
                    requested_at: r.created_at,
                    sender: sender.clone(),
                })
            })
            .collect();
        rows.sort_by(|a, b| b.requested_at.cmp(&a.requested_at));
        Ok(rows)
    }

    async fn create_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<ConnectionRequestEntity, error::SystemError> {
        let mut state = self.lock();
        if state.requests.iter().any(|r| r.sender_id == *sender_id && r.receiver_id == *receiver_id) {
            return Err(conflict("connection_requests_pair_key"));
        }
        let now = state.now(self.base);
        let request = ConnectionRequestEntity {
            id: Uuid::now_v7(),
            sender_id: *sender_id,
            receiver_id: *receiver_id,
            status: RequestStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        state.requests.push(request.clone());
        Ok(request)
    }
}

#[async_trait::async_trait]
impl ConnectionRepo for MemoryStore {
    async fn accept_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<ConnectionEntity, error::SystemError> {
        let mut state = self.lock();
        let now = state.now(self.base);
        let request = state.request_for_receiver(request_id, user_id)?;
        request.status = RequestStatus::Accepted;
        request.updated_at = now;
        let (user_a, user_b) = ordered_pair(request.sender_id, request.receiver_id);

        if let Some(existing) = state.connection(&user_a, &user_b) {
            return Ok(existing.clone());
        }
        let connection = ConnectionEntity { id: Uuid::now_v7(), user_a, user_b, created_at: now };
        state.connections.push(connection.clone());
        Ok(connection)
    }

    async fn ignore_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<ConnectionRequestEntity, error::SystemError> {
        let mut state = self.lock();
        let now = state.now(self.base);
        let request = state.request_for_receiver(request_id, user_id)?;
        request.status = RequestStatus::Ignored;
        request.updated_at = now;
        Ok(request.clone())
    }
}

#[async_trait::async_trait]
impl BlockRepository for MemoryStore {
    async fn find_block(
        &self,
        blocker_id: &Uuid,
        blocked_id: &Uuid,
    ) -> Result<Option<BlockEntity>, error::SystemError> {
        Ok(self
            .lock()
            .blocks
            .iter()
            .find(|b| b.blocker_id == *blocker_id && b.blocked_id == *blocked_id)
            .cloned())
    }

    async fn exists_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError> {
        Ok(self.lock().blocked_between(user_id_a, user_id_b))
    }

    async fn create_block_atomic(
        &self,
        blocker_id: &Uuid,
        blocked_id: &Uuid,
        reason: Option<String>,
    ) -> Result<BlockEntity, error::SystemError> {
        let mut state = self.lock();
        if state.blocks.iter().any(|b| b.blocker_id == *blocker_id && b.blocked_id == *blocked_id) {
            return Err(conflict("blocks_pair_key"));
        }
        let now = state.now(self.base);
        let block = BlockEntity {
            id: Uuid::now_v7(),
            blocker_id: *blocker_id,
            blocked_id: *blocked_id,
            reason,
            created_at: now,
        };
        state.blocks.push(block.clone());

        let (user_a, user_b) = ordered_pair(*blocker_id, *blocked_id);
        state.connections.retain(|c| !(c.user_a == user_a && c.user_b == user_b));
        state.requests.retain(|r| {
            !((r.sender_id == *blocker_id && r.receiver_id == *blocked_id)
                || (r.sender_id == *blocked_id && r.receiver_id == *blocker_id))
        });

        Ok(block)
    }

    async fn delete_block(
        &self,
        blocker_id: &Uuid,
        blocked_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let mut state = self.lock();
        let before = state.blocks.len();
        state.blocks.retain(|b| !(b.blocker_id == *blocker_id && b.blocked_id == *blocked_id));
        Ok(state.blocks.len() < before)
    }

    async fn find_blocked_by(
        &self,
        blocker_id: &Uuid,
    ) -> Result<Vec<BlockedUserRow>, error::SystemError> {
        let state = self.lock();
        let mut rows: Vec<BlockedUserRow> = state
            .blocks
            .iter()
            .filter(|b| b.blocker_id == *blocker_id)
            .filter_map(|b| {
                state.user(&b.blocked_id).map(|u| BlockedUserRow {
                    block_id: b.id,
                    user_id: u.id,
                    first_name: u.first_name.clone(),
                    current_province: u.current_province.clone(),
                    current_country: u.current_country.clone(),
                    blocked_at: b.created_at,
                })
            })
            .collect();
        rows.sort_by(|a, b| b.blocked_at.cmp(&a.blocked_at));
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl MatchingRepository for MemoryStore {
    async fn find_candidates(
        &self,
        user: &UserEntity,
        limit: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let state = self.lock();
        let mut candidates: Vec<UserEntity> = state
            .users
            .iter()
            .filter(|u| {
                u.id != user.id
                    && u.profile_complete
                    && u.home_country == user.home_country
                    && u.current_country == user.current_country
                    && state.connection(&user.id, &u.id).is_none()
                    && state.request_between(&user.id, &u.id).is_none()
                    && !state.blocked_between(&user.id, &u.id)
            })
            .cloned()
            .collect();
        candidates.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        candidates.truncate(limit.max(0) as usize);
        Ok(candidates)
    }
}

#[async_trait::async_trait]
impl MessageRepository for MemoryStore {
    async fn create(
        &self,
        message: &InsertMessage,
    ) -> Result<MessageWithUsers, error::SystemError> {
        let mut state = self.lock();
        let now = state.now(self.base);
        let entity = MessageEntity {
            id: Uuid::now_v7(),
            sender_id: message.sender_id,
            receiver_id: message.receiver_id,
            content: message.content.clone(),
            is_read: false,
            created_at: now,
        };
        let view = state.with_users(&entity)?;
        state.messages.push(entity);
        Ok(view)
    }

    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Vec<MessageWithUsers>, error::SystemError> {
        let state = self.lock();
        let mut messages: Vec<&MessageEntity> = state
            .messages
            .iter()
            .filter(|m| {
                (m.sender_id == *user_id_a && m.receiver_id == *user_id_b)
                    || (m.sender_id == *user_id_b && m.receiver_id == *user_id_a)
            })
            .collect();
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        messages.into_iter().map(|m| state.with_users(m)).collect()
    }

    async fn mark_read(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let mut state = self.lock();
        let mut updated = 0;
        for message in state.messages.iter_mut().filter(|m| {
            m.sender_id == *sender_id && m.receiver_id == *receiver_id && !m.is_read
        }) {
            message.is_read = true;
            updated += 1;
        }
        Ok(updated)
    }

    async fn find_conversation_summaries(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationSummaryRow>, error::SystemError> {
        let state = self.lock();
        let rows = state
            .connections
            .iter()
            .filter(|c| c.user_a == *user_id || c.user_b == *user_id)
            .filter_map(|c| {
                let peer_id = if c.user_a == *user_id { c.user_b } else { c.user_a };
                let peer = state.user(&peer_id)?;
                let last = state
                    .messages
                    .iter()
                    .filter(|m| {
                        (m.sender_id == *user_id && m.receiver_id == peer_id)
                            || (m.sender_id == peer_id && m.receiver_id == *user_id)
                    })
                    .max_by_key(|m| m.created_at);
                let unread_count = state
                    .messages
                    .iter()
                    .filter(|m| m.sender_id == peer_id && m.receiver_id == *user_id && !m.is_read)
                    .count() as i64;

                Some(ConversationSummaryRow {
                    user_id: peer.id,
                    first_name: peer.first_name.clone(),
                    last_name: peer.last_name.clone(),
                    photo: peer.photo.clone(),
                    current_province: peer.current_province.clone(),
                    current_country: peer.current_country.clone(),
                    last_message_id: last.map(|m| m.id),
                    last_sender_id: last.map(|m| m.sender_id),
                    last_receiver_id: last.map(|m| m.receiver_id),
                    last_content: last.map(|m| m.content.clone()),
                    last_is_read: last.map(|m| m.is_read),
                    last_created_at: last.map(|m| m.created_at),
                    unread_count,
                })
            })
            .collect();
        Ok(rows)
    }
}

#[async_trait::async_trait]
impl LessonRepository for MemoryStore {
    async fn find_all(&self) -> Result<Vec<LessonEntity>, error::SystemError> {
        Ok(self.lock().lessons.clone())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<LessonEntity>, error::SystemError> {
        Ok(self.lock().lessons.iter().find(|l| l.id == *id).cloned())
    }

    async fn create(&self, lesson: &InsertLesson) -> Result<LessonEntity, error::SystemError> {
        let entity = LessonEntity {
            id: Uuid::now_v7(),
            teacher_id: lesson.teacher_id,
            student_ids: lesson.student_ids.clone(),
            date: lesson.date,
            location: lesson.location.clone(),
            description: lesson.description.clone(),
            downloadable_url: lesson.downloadable_url.clone(),
            status: lesson.status,
        };
        self.lock().lessons.push(entity.clone());
        Ok(entity)
    }

    async fn update(
        &self,
        id: &Uuid,
        update: &UpdateLessonModel,
    ) -> Result<Option<LessonEntity>, error::SystemError> {
        let mut state = self.lock();
        let Some(lesson) = state.lessons.iter_mut().find(|l| l.id == *id) else {
            return Ok(None);
        };
        if let Some(v) = &update.student_ids {
            lesson.student_ids = v.clone();
        }
        if let Some(v) = update.date {
            lesson.date = v;
        }
        if let Some(v) = &update.location {
            lesson.location = v.clone();
        }
        if let Some(v) = &update.description {
            lesson.description = v.clone();
        }
        if let Some(v) = &update.downloadable_url {
            lesson.downloadable_url = v.clone();
        }
        if let Some(v) = update.status {
            lesson.status = v;
        }
        Ok(Some(lesson.clone()))
    }

    async fn delete(&self, id: &Uuid) -> Result<bool, error::SystemError> {
        let mut state = self.lock();
        let before = state.lessons.len();
        state.lessons.retain(|l| l.id != *id);
        Ok(state.lessons.len() < before)
    }

    async fn find_by_student(
        &self,
        student_id: &Uuid,
    ) -> Result<Vec<LessonEntity>, error::SystemError> {
        Ok(self
            .lock()
            .lessons
            .iter()
            .filter(|l| l.student_ids.contains(student_id))
            .cloned()
            .collect())
    }

    async fn find_by_teacher(
        &self,
        teacher_id: &Uuid,
    ) -> Result<Vec<LessonEntity>, error::SystemError> {
        Ok(self.lock().lessons.iter().filter(|l| l.teacher_id == *teacher_id).cloned().collect())
    }
}

/// Fills in the variables `ENV` insists on when the test process has none.
pub fn test_env() -> &'static crate::constants::Env {
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        for (key, value) in
            [("JWT_SECRET", TEST_SECRET), ("DATABASE_URL", "postgres://localhost/kinmeet_test")]
        {
            if std::env::var(key).is_err() {
                std::env::set_var(key, value);
            }
        }
    });
    &crate::ENV
}

/// Inserts a complete profile through the Postgres repository.
pub async fn pg_user(
    pool: &sqlx::PgPool,
    first_name: &str,
    home_country: &str,
    current_country: &str,
) -> UserEntity {
    UserRepositoryPg::new(pool.clone())
        .create(&InsertUser {
            email: format!("{}-{}@example.com", first_name.to_lowercase(), Uuid::now_v7()),
            hash_password: "not-a-real-hash".to_string(),
            first_name: first_name.to_string(),
            last_name: "Tester".to_string(),
            home_country: home_country.to_string(),
            current_province: "Quebec".to_string(),
            current_country: current_country.to_string(),
            languages: vec!["French".to_string()],
            interests: vec![],
            looking_for: vec![LookingFor::Friendship],
            photo: None,
            profile_complete: true,
        })
        .await
        .unwrap()
}

/// Inserts a connection row directly, bypassing the request flow.
pub async fn pg_connect(pool: &sqlx::PgPool, a: Uuid, b: Uuid) {
    let (user_a, user_b) = ordered_pair(a, b);
    sqlx::query("INSERT INTO connections (id, user_a, user_b) VALUES ($1, $2, $3)")
        .bind(Uuid::now_v7())
        .bind(user_a)
        .bind(user_b)
        .execute(pool)
        .await
        .unwrap();
}

pub async fn pg_count(pool: &sqlx::PgPool, table: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
        .fetch_one(pool)
        .await
        .unwrap()
}

/// Captures every frame the services push instead of delivering it.
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<(Uuid, ServerMessage)>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn events(&self) -> Vec<(Uuid, ServerMessage)> {
        self.events.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.events.lock().unwrap().clear();
    }
}

impl UserNotifier for RecordingNotifier {
    fn notify(&self, user_id: Uuid, message: ServerMessage) {
        self.events.lock().unwrap().push((user_id, message));
    }
}

use uuid::Uuid;

use crate::api::error;
use crate::modules::connection::model::PendingRequestRow;
use crate::modules::connection::schema::{ConnectionEntity, ConnectionRequestEntity};
use crate::modules::user::schema::UserEntity;

#[async_trait::async_trait]
pub trait ConnectionRepository {
    /// Order of the two ids does not matter.
    async fn find_connection(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<ConnectionEntity>, error::SystemError>;

    /// Connected peers, most recent connection first.
    async fn find_connected_users(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<UserEntity>, error::SystemError>;
}

#[async_trait::async_trait]
pub trait ConnectionRequestRepository {
    /// Any request between the two users, whichever direction and status.
    async fn find_request_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<ConnectionRequestEntity>, error::SystemError>;

    async fn find_pending_requests_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<PendingRequestRow>, error::SystemError>;

    async fn create_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<ConnectionRequestEntity, error::SystemError>;
}

#[async_trait::async_trait]
pub trait ConnectionRepo: ConnectionRepository + ConnectionRequestRepository + Send + Sync {
    /// Marks the request accepted and stores the connection in one transaction.
    async fn accept_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<ConnectionEntity, error::SystemError>;

    async fn ignore_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<ConnectionRequestEntity, error::SystemError>;
}

use uuid::Uuid;

use crate::api::error;
use crate::modules::block::{model::BlockedUserRow, schema::BlockEntity};

#[async_trait::async_trait]
pub trait BlockRepository {
    async fn find_block(
        &self,
        blocker_id: &Uuid,
        blocked_id: &Uuid,
    ) -> Result<Option<BlockEntity>, error::SystemError>;

    /// True when either user has blocked the other.
    async fn exists_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError>;

    /// Inserts the block and removes the pair's connection and requests in one transaction.
    async fn create_block_atomic(
        &self,
        blocker_id: &Uuid,
        blocked_id: &Uuid,
        reason: Option<String>,
    ) -> Result<BlockEntity, error::SystemError>;

    /// Returns false when there was nothing to delete.
    async fn delete_block(
        &self,
        blocker_id: &Uuid,
        blocked_id: &Uuid,
    ) -> Result<bool, error::SystemError>;

    async fn find_blocked_by(
        &self,
        blocker_id: &Uuid,
    ) -> Result<Vec<BlockedUserRow>, error::SystemError>;
}

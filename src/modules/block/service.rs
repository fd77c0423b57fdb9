use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    constants::REPORT_REASON_PREFIX,
    modules::{
        block::{model::BlockedUser, repository::BlockRepository, schema::BlockEntity},
        user::repository::UserRepository,
    },
};

#[derive(Clone)]
pub struct BlockService<B, U>
where
    B: BlockRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    block_repo: Arc<B>,
    user_repo: Arc<U>,
}

impl<B, U> BlockService<B, U>
where
    B: BlockRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(block_repo: Arc<B>, user_repo: Arc<U>) -> Self {
        BlockService { block_repo, user_repo }
    }

    pub async fn block_user(
        &self,
        blocker_id: Uuid,
        blocked_id: Uuid,
        reason: Option<String>,
    ) -> Result<BlockEntity, error::SystemError> {
        if blocker_id == blocked_id {
            return Err(error::SystemError::bad_request("Cannot block yourself"));
        }

        let (target, existing) = tokio::try_join!(
            self.user_repo.find_by_id(&blocked_id),
            self.block_repo.find_block(&blocker_id, &blocked_id),
        )?;

        if target.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        if existing.is_some() {
            return Err(error::SystemError::bad_request("User already blocked"));
        }

        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        let block = self.block_repo.create_block_atomic(&blocker_id, &blocked_id, reason).await?;
        info!("User {} blocked {}", blocker_id, blocked_id);

        Ok(block)
    }

    pub async fn report_user(
        &self,
        reporter_id: Uuid,
        reported_id: Uuid,
        reason: String,
    ) -> Result<BlockEntity, error::SystemError> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(error::SystemError::bad_request("Reason is required"));
        }

        self.block_user(reporter_id, reported_id, Some(format!("{REPORT_REASON_PREFIX}{reason}")))
            .await
    }

    pub async fn unblock_user(
        &self,
        blocker_id: Uuid,
        blocked_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if !self.block_repo.delete_block(&blocker_id, &blocked_id).await? {
            return Err(error::SystemError::not_found("Block not found"));
        }
        Ok(())
    }

    pub async fn list_blocked(
        &self,
        blocker_id: Uuid,
    ) -> Result<Vec<BlockedUser>, error::SystemError> {
        let rows = self.block_repo.find_blocked_by(&blocker_id).await?;
        Ok(rows.into_iter().map(BlockedUser::from).collect())
    }
}

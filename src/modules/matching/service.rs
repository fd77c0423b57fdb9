use log::{debug, info};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    api::error,
    constants::MATCH_PAGE_SIZE,
    modules::{
        block::repository::BlockRepository,
        connection::{repository::ConnectionRepo, schema::ConnectionRequestEntity},
        matching::repository::MatchingRepository,
        user::{model::PublicProfile, repository::UserRepository},
    },
};

#[derive(Clone)]
pub struct MatchingService<M, C, B, U>
where
    M: MatchingRepository + Send + Sync,
    C: ConnectionRepo + Send + Sync,
    B: BlockRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    matching_repo: Arc<M>,
    connection_repo: Arc<C>,
    block_repo: Arc<B>,
    user_repo: Arc<U>,
}

impl<M, C, B, U> MatchingService<M, C, B, U>
where
    M: MatchingRepository + Send + Sync,
    C: ConnectionRepo + Send + Sync,
    B: BlockRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(
        matching_repo: Arc<M>,
        connection_repo: Arc<C>,
        block_repo: Arc<B>,
        user_repo: Arc<U>,
    ) -> Self {
        MatchingService { matching_repo, connection_repo, block_repo, user_repo }
    }

    pub async fn get_matches(&self, user_id: Uuid) -> Result<Vec<PublicProfile>, error::SystemError> {
        let user = self
            .user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        let candidates = self.matching_repo.find_candidates(&user, MATCH_PAGE_SIZE).await?;
        debug!("{} candidates for user {}", candidates.len(), user_id);

        Ok(candidates.into_iter().map(|c| PublicProfile::from_entity(c, false)).collect())
    }

    pub async fn send_meet_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<ConnectionRequestEntity, error::SystemError> {
        if sender_id == receiver_id {
            return Err(error::SystemError::bad_request("Cannot send request to yourself"));
        }

        if self.user_repo.find_by_id(&receiver_id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        let (blocked, connection, request) = tokio::try_join!(
            self.block_repo.exists_between(&sender_id, &receiver_id),
            self.connection_repo.find_connection(&sender_id, &receiver_id),
            self.connection_repo.find_request_between(&sender_id, &receiver_id),
        )?;

        if blocked {
            return Err(error::SystemError::forbidden("Cannot send request"));
        }

        if connection.is_some() {
            return Err(error::SystemError::bad_request("Already connected"));
        }

        if request.is_some() {
            return Err(error::SystemError::bad_request("Request already exists"));
        }

        let request = self.connection_repo.create_request(&sender_id, &receiver_id).await?;
        info!("User {} sent a meet request to {}", sender_id, receiver_id);

        Ok(request)
    }

    /// Passing is not remembered: the candidate shows up again next time.
    pub fn pass(&self, user_id: Uuid, target_id: Option<Uuid>) {
        debug!("User {} passed on {:?}", user_id, target_id);
    }
}

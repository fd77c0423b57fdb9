use crate::api::error;
use crate::modules::user::schema::UserEntity;

#[async_trait::async_trait]
pub trait MatchingRepository {
    /// Complete profiles sharing the user's home and current country, minus
    /// anyone already connected, requested either way or blocked either way.
    /// Newest accounts first.
    async fn find_candidates(
        &self,
        user: &UserEntity,
        limit: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError>;
}

use crate::{
    api::error,
    modules::{matching::repository::MatchingRepository, user::schema::UserEntity},
};

#[derive(Clone)]
pub struct MatchingRepositoryPg {
    pool: sqlx::PgPool,
}

impl MatchingRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MatchingRepository for MatchingRepositoryPg {
    async fn find_candidates(
        &self,
        user: &UserEntity,
        limit: i64,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let candidates = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT u.*
            FROM users u
            WHERE u.id <> $1
              AND u.home_country = $2
              AND u.current_country = $3
              AND u.profile_complete
              AND NOT EXISTS (
                  SELECT 1 FROM connections c
                  WHERE (c.user_a = $1 AND c.user_b = u.id)
                     OR (c.user_b = $1 AND c.user_a = u.id)
              )
              AND NOT EXISTS (
                  SELECT 1 FROM connection_requests cr
                  WHERE (cr.sender_id = $1 AND cr.receiver_id = u.id)
                     OR (cr.sender_id = u.id AND cr.receiver_id = $1)
              )
              AND NOT EXISTS (
                  SELECT 1 FROM blocks b
                  WHERE (b.blocker_id = $1 AND b.blocked_id = u.id)
                     OR (b.blocker_id = u.id AND b.blocked_id = $1)
              )
            ORDER BY u.created_at DESC
            LIMIT $4
            "#,
        )
        .bind(user.id)
        .bind(&user.home_country)
        .bind(&user.current_country)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(candidates)
    }
}

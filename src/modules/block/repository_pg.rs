use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        block::{model::BlockedUserRow, repository::BlockRepository, schema::BlockEntity},
        connection::schema::ordered_pair,
    },
};

#[derive(Clone)]
pub struct BlockRepositoryPg {
    pool: sqlx::PgPool,
}

impl BlockRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl BlockRepository for BlockRepositoryPg {
    async fn find_block(
        &self,
        blocker_id: &Uuid,
        blocked_id: &Uuid,
    ) -> Result<Option<BlockEntity>, error::SystemError> {
        let block = sqlx::query_as::<_, BlockEntity>(
            "SELECT * FROM blocks WHERE blocker_id = $1 AND blocked_id = $2",
        )
        .bind(blocker_id)
        .bind(blocked_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(block)
    }

    async fn exists_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM blocks
                WHERE
                    (blocker_id = $1 AND blocked_id = $2)
                 OR (blocker_id = $2 AND blocked_id = $1)
            )
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn create_block_atomic(
        &self,
        blocker_id: &Uuid,
        blocked_id: &Uuid,
        reason: Option<String>,
    ) -> Result<BlockEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let block = sqlx::query_as::<_, BlockEntity>(
            r#"
            INSERT INTO blocks (id, blocker_id, blocked_id, reason)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(blocker_id)
        .bind(blocked_id)
        .bind(reason)
        .fetch_one(&mut *tx)
        .await?;

        // Requests go first: this waits on any accept holding the request row,
        // so the connection delete below sees the connection it committed.
        sqlx::query(
            r#"
            DELETE FROM connection_requests
            WHERE
                (sender_id = $1 AND receiver_id = $2)
             OR (sender_id = $2 AND receiver_id = $1)
            "#,
        )
        .bind(blocker_id)
        .bind(blocked_id)
        .execute(&mut *tx)
        .await?;

        let (user_a, user_b) = ordered_pair(*blocker_id, *blocked_id);
        sqlx::query("DELETE FROM connections WHERE user_a = $1 AND user_b = $2")
            .bind(user_a)
            .bind(user_b)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(block)
    }

    async fn delete_block(
        &self,
        blocker_id: &Uuid,
        blocked_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let result = sqlx::query("DELETE FROM blocks WHERE blocker_id = $1 AND blocked_id = $2")
            .bind(blocker_id)
            .bind(blocked_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn find_blocked_by(
        &self,
        blocker_id: &Uuid,
    ) -> Result<Vec<BlockedUserRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, BlockedUserRow>(
            r#"
            SELECT
                b.id AS block_id,
                u.id AS user_id,
                u.first_name,
                u.current_province,
                u.current_country,
                b.created_at AS blocked_at
            FROM blocks b
            JOIN users u
                ON b.blocked_id = u.id
            WHERE b.blocker_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(blocker_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

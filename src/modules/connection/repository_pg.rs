use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        connection::{
            model::PendingRequestRow,
            repository::{ConnectionRepo, ConnectionRepository, ConnectionRequestRepository},
            schema::{ConnectionEntity, ConnectionRequestEntity, ordered_pair},
        },
        user::schema::UserEntity,
    },
};

#[derive(Clone)]
pub struct ConnectionRepositoryPg {
    pool: sqlx::PgPool,
}

impl ConnectionRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }

    async fn lock_request(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        request_id: &Uuid,
    ) -> Result<ConnectionRequestEntity, error::SystemError> {
        sqlx::query_as::<_, ConnectionRequestEntity>(
            "SELECT * FROM connection_requests WHERE id = $1 FOR UPDATE",
        )
        .bind(request_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Request not found"))
    }
}

#[async_trait::async_trait]
impl ConnectionRepository for ConnectionRepositoryPg {
    async fn find_connection(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<ConnectionEntity>, error::SystemError> {
        let (user_a, user_b) = ordered_pair(*user_id_a, *user_id_b);

        let connection = sqlx::query_as::<_, ConnectionEntity>(
            "SELECT * FROM connections WHERE user_a = $1 AND user_b = $2",
        )
        .bind(user_a)
        .bind(user_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(connection)
    }

    async fn find_connected_users(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<UserEntity>, error::SystemError> {
        let users = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT u.*
            FROM connections c
            JOIN users u
                ON u.id = CASE
                    WHEN c.user_a = $1 THEN c.user_b
                    ELSE c.user_a
                END
            WHERE c.user_a = $1
               OR c.user_b = $1
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }
}

#[async_trait::async_trait]
impl ConnectionRequestRepository for ConnectionRepositoryPg {
    async fn find_request_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<ConnectionRequestEntity>, error::SystemError> {
        let request = sqlx::query_as::<_, ConnectionRequestEntity>(
            r#"
            SELECT *
            FROM connection_requests
            WHERE
                (sender_id = $1 AND receiver_id = $2)
             OR (sender_id = $2 AND receiver_id = $1)
            LIMIT 1
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_optional(&self.pool)
        .await?;

        Ok(request)
    }

    async fn find_pending_requests_to_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<PendingRequestRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, PendingRequestRow>(
            r#"
            SELECT
                cr.id AS request_id,
                cr.status,
                cr.created_at AS requested_at,
                u.*
            FROM connection_requests cr
            JOIN users u
                ON cr.sender_id = u.id
            WHERE cr.receiver_id = $1
              AND cr.status = 'pending'
            ORDER BY cr.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<ConnectionRequestEntity, error::SystemError> {
        let request = sqlx::query_as::<_, ConnectionRequestEntity>(
            r#"
            INSERT INTO connection_requests (id, sender_id, receiver_id)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(sender_id)
        .bind(receiver_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(request)
    }
}

#[async_trait::async_trait]
impl ConnectionRepo for ConnectionRepositoryPg {
    async fn accept_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<ConnectionEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let request = Self::lock_request(&mut tx, request_id).await?;
        if let Err(e) = request.ensure_actionable_by(user_id) {
            tx.rollback().await?;
            return Err(e);
        }

        sqlx::query(
            "UPDATE connection_requests SET status = 'accepted', updated_at = NOW() WHERE id = $1",
        )
        .bind(request_id)
        .execute(&mut *tx)
        .await?;

        let (user_a, user_b) = ordered_pair(request.sender_id, request.receiver_id);

        // a reverse request may already have produced this pair
        let connection = sqlx::query_as::<_, ConnectionEntity>(
            r#"
            INSERT INTO connections (id, user_a, user_b)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_a, user_b) DO UPDATE SET user_a = EXCLUDED.user_a
            RETURNING *
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(user_a)
        .bind(user_b)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(connection)
    }

    async fn ignore_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<ConnectionRequestEntity, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        let request = Self::lock_request(&mut tx, request_id).await?;
        if let Err(e) = request.ensure_actionable_by(user_id) {
            tx.rollback().await?;
            return Err(e);
        }

        let request = sqlx::query_as::<_, ConnectionRequestEntity>(
            r#"
            UPDATE connection_requests
            SET status = 'ignored', updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(request_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(request)
    }
}

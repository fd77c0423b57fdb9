use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{
        model::{ConversationSummaryRow, InsertMessage, MessageWithUsersRow},
        repository::MessageRepository,
        schema::MessageWithUsers,
    },
};

#[derive(Clone)]
pub struct MessageRepositoryPg {
    pool: sqlx::PgPool,
}

impl MessageRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageRepositoryPg {
    async fn create(
        &self,
        message: &InsertMessage,
    ) -> Result<MessageWithUsers, error::SystemError> {
        let row = sqlx::query_as::<_, MessageWithUsersRow>(
            r#"
            WITH inserted AS (
                INSERT INTO messages (id, sender_id, receiver_id, content)
                VALUES ($1, $2, $3, $4)
                RETURNING *
            )
            SELECT
                m.*,
                s.first_name AS sender_first_name,
                s.last_name AS sender_last_name,
                r.first_name AS receiver_first_name,
                r.last_name AS receiver_last_name
            FROM inserted m
            JOIN users s
                ON s.id = m.sender_id
            JOIN users r
                ON r.id = m.receiver_id
            "#,
        )
        .bind(Uuid::now_v7())
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn find_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Vec<MessageWithUsers>, error::SystemError> {
        let rows = sqlx::query_as::<_, MessageWithUsersRow>(
            r#"
            SELECT
                m.*,
                s.first_name AS sender_first_name,
                s.last_name AS sender_last_name,
                r.first_name AS receiver_first_name,
                r.last_name AS receiver_last_name
            FROM messages m
            JOIN users s
                ON s.id = m.sender_id
            JOIN users r
                ON r.id = m.receiver_id
            WHERE
                (m.sender_id = $1 AND m.receiver_id = $2)
             OR (m.sender_id = $2 AND m.receiver_id = $1)
            ORDER BY m.created_at ASC, m.id ASC
            "#,
        )
        .bind(user_id_a)
        .bind(user_id_b)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MessageWithUsers::from).collect())
    }

    async fn mark_read(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<u64, error::SystemError> {
        let result = sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE sender_id = $1
              AND receiver_id = $2
              AND NOT is_read
            "#,
        )
        .bind(sender_id)
        .bind(receiver_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected())
    }

    async fn find_conversation_summaries(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationSummaryRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, ConversationSummaryRow>(
            r#"
            SELECT
                u.id AS user_id,
                u.first_name,
                u.last_name,
                u.photo,
                u.current_province,
                u.current_country,
                lm.id AS last_message_id,
                lm.sender_id AS last_sender_id,
                lm.receiver_id AS last_receiver_id,
                lm.content AS last_content,
                lm.is_read AS last_is_read,
                lm.created_at AS last_created_at,
                (
                    SELECT COUNT(*)
                    FROM messages um
                    WHERE um.sender_id = u.id
                      AND um.receiver_id = $1
                      AND NOT um.is_read
                ) AS unread_count
            FROM connections c
            JOIN users u
                ON u.id = CASE
                    WHEN c.user_a = $1 THEN c.user_b
                    ELSE c.user_a
                END
            LEFT JOIN LATERAL (
                SELECT m.*
                FROM messages m
                WHERE
                    (m.sender_id = $1 AND m.receiver_id = u.id)
                 OR (m.sender_id = u.id AND m.receiver_id = $1)
                ORDER BY m.created_at DESC, m.id DESC
                LIMIT 1
            ) lm ON TRUE
            WHERE c.user_a = $1
               OR c.user_b = $1
            ORDER BY lm.created_at DESC NULLS LAST, c.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

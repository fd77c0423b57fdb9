use uuid::Uuid;

use crate::{
    api::error,
    modules::user::{
        model::{InsertUser, UpdateUser},
        repository::UserRepository,
        schema::UserEntity,
    },
};

#[derive(Clone)]
pub struct UserRepositoryPg {
    pool: sqlx::PgPool,
}

impl UserRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepository for UserRepositoryPg {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError> {
        let id = Uuid::now_v7();
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
            INSERT INTO users (
                id, email, hash_password, first_name, last_name, home_country,
                current_province, current_country, languages, interests, looking_for,
                photo, profile_complete
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&user.email)
        .bind(&user.hash_password)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.home_country)
        .bind(&user.current_province)
        .bind(&user.current_country)
        .bind(&user.languages)
        .bind(&user.interests)
        .bind(&user.looking_for)
        .bind(&user.photo)
        .bind(user.profile_complete)
        .fetch_one(&self.pool)
        .await?;
        Ok(user)
    }

    async fn update(&self, id: &Uuid, user: &UpdateUser) -> Result<UserEntity, error::SystemError> {
        let user = sqlx::query_as::<_, UserEntity>(
            r#"
        UPDATE users
        SET
            first_name       = COALESCE($2, first_name),
            last_name        = COALESCE($3, last_name),
            home_country     = COALESCE($4, home_country),
            current_province = COALESCE($5, current_province),
            current_country  = COALESCE($6, current_country),
            languages        = COALESCE($7, languages),
            interests        = COALESCE($8, interests),
            looking_for      = COALESCE($9, looking_for),
            photo            = CASE WHEN $10::boolean THEN $11 ELSE photo END,
            profile_complete = TRUE,
            updated_at       = NOW()
        WHERE id = $1
        RETURNING *
        "#,
        )
        .bind(id)
        .bind(&user.first_name) // $2: Option<String>
        .bind(&user.last_name) // $3
        .bind(&user.home_country) // $4
        .bind(&user.current_province) // $5
        .bind(&user.current_country) // $6
        .bind(&user.languages) // $7: Option<Vec<String>>
        .bind(&user.interests) // $8
        .bind(&user.looking_for) // $9: Option<Vec<LookingFor>>
        .bind(user.photo.is_some()) // $10: bool - was photo provided?
        .bind(user.photo.as_ref().and_then(|v| v.as_ref())) // $11: Option<&String>
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        Ok(user)
    }
}

use log::info;
use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::connection::repository::ConnectionRepository;
use crate::modules::user::model::{
    AuthResponse, AuthUser, InsertUser, LoginModel, PeerProfileResponse, ProfileResponse,
    PublicProfile, RegisterModel, UpdateProfileModel,
};
use crate::modules::user::repository::UserRepository;
use crate::modules::user::schema::UserEntity;
use crate::utils::{
    hash_password, is_password_secure, verify_password, Claims, PASSWORD_RULE_MESSAGE,
};

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository + Send + Sync>,
    connection_repo: Arc<dyn ConnectionRepository + Send + Sync>,
    jwt_secret: Arc<str>,
    token_expiration: u64,
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserService {
    pub fn with_dependencies(
        repo: Arc<dyn UserRepository + Send + Sync>,
        connection_repo: Arc<dyn ConnectionRepository + Send + Sync>,
        jwt_secret: &str,
        token_expiration: u64,
    ) -> Self {
        info!("UserService initialized with dependencies");
        UserService { repo, connection_repo, jwt_secret: jwt_secret.into(), token_expiration }
    }

    fn issue_token(&self, user: &UserEntity) -> Result<AuthResponse, error::SystemError> {
        let token = Claims::new(&user.id, &user.display_name(), &user.email, self.token_expiration)
            .encode(self.jwt_secret.as_bytes())?;

        Ok(AuthResponse { token, user: AuthUser::from(user) })
    }

    pub async fn register(&self, user: RegisterModel) -> Result<AuthResponse, error::SystemError> {
        if !is_password_secure(&user.password) {
            return Err(error::SystemError::bad_request(PASSWORD_RULE_MESSAGE));
        }

        let email = normalize_email(&user.email);
        if self.repo.find_by_email(&email).await?.is_some() {
            return Err(error::SystemError::bad_request("User already exists"));
        }

        let hash_password = hash_password(&user.password)?;

        let new_user = InsertUser {
            email,
            hash_password,
            first_name: user.first_name.trim().to_string(),
            last_name: user.last_name.trim().to_string(),
            home_country: user.home_country.trim().to_string(),
            current_province: user.current_location.province.trim().to_string(),
            current_country: user.current_location.country.trim().to_string(),
            languages: user.languages,
            interests: user.interests,
            looking_for: user.looking_for,
            photo: user.photo,
            profile_complete: true,
        };

        let created = self.repo.create(&new_user).await?;
        info!("User {} registered", created.id);

        self.issue_token(&created)
    }

    pub async fn login(&self, credentials: LoginModel) -> Result<AuthResponse, error::SystemError> {
        let email = normalize_email(&credentials.email);
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid credentials"))?;

        let valid = verify_password(&user.hash_password, &credentials.password)?;
        if !valid {
            return Err(error::SystemError::unauthorized("Invalid credentials"));
        }

        self.issue_token(&user)
    }

    /// Tokens are stateless: nothing to revoke, the client drops its copy.
    pub fn logout(&self, user_id: Uuid) {
        info!("User {} logged out", user_id);
    }

    pub async fn get_me(&self, id: Uuid) -> Result<ProfileResponse, error::SystemError> {
        let user = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;
        Ok(ProfileResponse::from(user))
    }

    pub async fn update_me(
        &self,
        id: Uuid,
        update: UpdateProfileModel,
    ) -> Result<ProfileResponse, error::SystemError> {
        if update.is_empty() {
            return Err(error::SystemError::bad_request("No fields to update"));
        }

        let user = self.repo.update(&id, &update.into()).await?;
        Ok(ProfileResponse::from(user))
    }

    pub async fn get_profile(
        &self,
        viewer_id: Uuid,
        target_id: Uuid,
    ) -> Result<PeerProfileResponse, error::SystemError> {
        let (user, connection) = tokio::try_join!(
            self.repo.find_by_id(&target_id),
            self.connection_repo.find_connection(&viewer_id, &target_id),
        )?;

        let user = user.ok_or_else(|| error::SystemError::not_found("User not found"))?;
        let is_connected = connection.is_some();

        Ok(PeerProfileResponse { user: PublicProfile::from_entity(user, is_connected), is_connected })
    }
}

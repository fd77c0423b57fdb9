use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::modules::user::schema::{LookingFor, UserEntity};
use crate::utils::{double_option, trimmed_string};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CurrentLocation {
    #[validate(length(min = 1, message = "Province cannot be empty"))]
    pub province: String,
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterModel {
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: String,
    #[validate(length(min = 1, message = "Home country cannot be empty"))]
    pub home_country: String,
    #[validate(nested)]
    pub current_location: CurrentLocation,
    #[validate(length(min = 1, message = "At least one language is required"))]
    pub languages: Vec<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub looking_for: Vec<LookingFor>,
    pub photo: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginModel {
    #[serde(deserialize_with = "trimmed_string")]
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Email and password are required"))]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileModel {
    #[validate(length(min = 1, message = "First name cannot be empty"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, message = "Last name cannot be empty"))]
    pub last_name: Option<String>,
    #[validate(length(min = 1, message = "Home country cannot be empty"))]
    pub home_country: Option<String>,
    #[validate(nested)]
    pub current_location: Option<CurrentLocation>,
    #[validate(length(min = 1, message = "At least one language is required"))]
    pub languages: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub looking_for: Option<Vec<LookingFor>>,
    #[serde(default, deserialize_with = "double_option")]
    pub photo: Option<Option<String>>,
}

impl UpdateProfileModel {
    pub fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.home_country.is_none()
            && self.current_location.is_none()
            && self.languages.is_none()
            && self.interests.is_none()
            && self.looking_for.is_none()
            && self.photo.is_none()
    }
}

pub struct InsertUser {
    pub email: String,
    pub hash_password: String,
    pub first_name: String,
    pub last_name: String,
    pub home_country: String,
    pub current_province: String,
    pub current_country: String,
    pub languages: Vec<String>,
    pub interests: Vec<String>,
    pub looking_for: Vec<LookingFor>,
    pub photo: Option<String>,
    pub profile_complete: bool,
}

#[derive(Default)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub home_country: Option<String>,
    pub current_province: Option<String>,
    pub current_country: Option<String>,
    pub languages: Option<Vec<String>>,
    pub interests: Option<Vec<String>>,
    pub looking_for: Option<Vec<LookingFor>>,
    pub photo: Option<Option<String>>,
}

impl From<UpdateProfileModel> for UpdateUser {
    fn from(model: UpdateProfileModel) -> Self {
        let (current_province, current_country) = match model.current_location {
            Some(location) => (Some(location.province), Some(location.country)),
            None => (None, None),
        };

        UpdateUser {
            first_name: model.first_name,
            last_name: model.last_name,
            home_country: model.home_country,
            current_province,
            current_country,
            languages: model.languages,
            interests: model.interests,
            looking_for: model.looking_for,
            photo: model.photo,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
    pub name: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<&UserEntity> for AuthUser {
    fn from(entity: &UserEntity) -> Self {
        AuthUser {
            id: entity.id,
            email: entity.email.clone(),
            name: entity.display_name(),
            first_name: entity.first_name.clone(),
            last_name: entity.last_name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: AuthUser,
}

/// The owner's own view of their profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub home_country: String,
    pub current_province: String,
    pub current_country: String,
    pub languages: Vec<String>,
    pub interests: Vec<String>,
    pub looking_for: Vec<LookingFor>,
    pub photo: Option<String>,
    pub profile_complete: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserEntity> for ProfileResponse {
    fn from(entity: UserEntity) -> Self {
        ProfileResponse {
            id: entity.id,
            email: entity.email,
            first_name: entity.first_name,
            last_name: entity.last_name,
            home_country: entity.home_country,
            current_province: entity.current_province,
            current_country: entity.current_country,
            languages: entity.languages,
            interests: entity.interests,
            looking_for: entity.looking_for,
            photo: entity.photo,
            profile_complete: entity.profile_complete,
            created_at: entity.created_at,
        }
    }
}

/// What other users get to see. Email is never exposed and the last name
/// only between connected users.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicProfile {
    pub id: Uuid,
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub home_country: String,
    pub current_province: String,
    pub current_country: String,
    pub languages: Vec<String>,
    pub interests: Vec<String>,
    pub looking_for: Vec<LookingFor>,
    pub photo: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl PublicProfile {
    pub fn from_entity(entity: UserEntity, reveal_last_name: bool) -> Self {
        PublicProfile {
            id: entity.id,
            first_name: entity.first_name,
            last_name: reveal_last_name.then_some(entity.last_name),
            home_country: entity.home_country,
            current_province: entity.current_province,
            current_country: entity.current_country,
            languages: entity.languages,
            interests: entity.interests,
            looking_for: entity.looking_for,
            photo: entity.photo,
            created_at: entity.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProfileEnvelope {
    pub user: ProfileResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeerProfileResponse {
    pub user: PublicProfile,
    pub is_connected: bool,
}

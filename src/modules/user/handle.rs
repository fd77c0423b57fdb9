use actix_web::{HttpRequest, get, post, put, web};
use uuid::Uuid;

use crate::api::{error, success};
use crate::middlewares::get_extensions;
use crate::modules::user::{model, service::UserService};
use crate::utils::{Claims, ValidatedJson};

#[post("/register")]
pub async fn register(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::RegisterModel>,
) -> Result<success::Success<model::AuthResponse>, error::Error> {
    let response = user_service.register(user_data.0).await?;
    Ok(success::Success::created(Some(response)).message("Registration successful"))
}

#[post("/login")]
pub async fn login(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::LoginModel>,
) -> Result<success::Success<model::AuthResponse>, error::Error> {
    let response = user_service.login(user_data.0).await?;
    Ok(success::Success::ok(Some(response)).message("Login successful"))
}

#[post("/logout", wrap = "actix_web::middleware::from_fn(crate::middlewares::authentication)")]
pub async fn logout(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    user_service.logout(user_id);
    Ok(success::Success::ok(None).message("Logged out successfully"))
}

#[get("/me")]
pub async fn get_me(
    user_service: web::Data<UserService>,
    req: HttpRequest,
) -> Result<success::Success<model::ProfileEnvelope>, error::Error> {
    let id = get_extensions::<Claims>(&req)?.sub;
    let user = user_service.get_me(id).await?;
    Ok(success::Success::ok(Some(model::ProfileEnvelope { user })))
}

#[put("/me")]
pub async fn update_me(
    user_service: web::Data<UserService>,
    user_data: ValidatedJson<model::UpdateProfileModel>,
    req: HttpRequest,
) -> Result<success::Success<model::ProfileEnvelope>, error::Error> {
    let id = get_extensions::<Claims>(&req)?.sub;
    let user = user_service.update_me(id, user_data.0).await?;
    Ok(success::Success::ok(Some(model::ProfileEnvelope { user }))
        .message("Profile updated successfully"))
}

#[get("/{user_id:[0-9a-fA-F-]{36}}")]
pub async fn get_profile(
    user_service: web::Data<UserService>,
    user_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<model::PeerProfileResponse>, error::Error> {
    let viewer_id = get_extensions::<Claims>(&req)?.sub;
    let profile = user_service.get_profile(viewer_id, user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(profile)))
}

use actix_web::{HttpRequest, get, post, web};

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::{
        block::repository_pg::BlockRepositoryPg,
        connection::{model::RequestEnvelope, repository_pg::ConnectionRepositoryPg},
        matching::{
            model::{MatchesEnvelope, MeetModel, PassModel},
            repository_pg::MatchingRepositoryPg,
            service::MatchingService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::{Claims, ValidatedJson},
};

pub type MatchingSvc =
    MatchingService<MatchingRepositoryPg, ConnectionRepositoryPg, BlockRepositoryPg, UserRepositoryPg>;

#[get("")]
pub async fn get_matches(
    matching_service: web::Data<MatchingSvc>,
    req: HttpRequest,
) -> Result<success::Success<MatchesEnvelope>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let matches = matching_service.get_matches(user_id).await?;

    Ok(success::Success::ok(Some(MatchesEnvelope { matches })))
}

#[post("/meet")]
pub async fn meet(
    matching_service: web::Data<MatchingSvc>,
    body: ValidatedJson<MeetModel>,
    req: HttpRequest,
) -> Result<success::Success<RequestEnvelope>, error::Error> {
    let sender_id = get_extensions::<Claims>(&req)?.sub;
    let request = matching_service.send_meet_request(sender_id, body.0.receiver_id).await?;

    Ok(success::Success::created(Some(RequestEnvelope { request }))
        .message("Connection request sent"))
}

#[post("/pass")]
pub async fn pass(
    matching_service: web::Data<MatchingSvc>,
    body: Option<web::Json<PassModel>>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let target = body.and_then(|b| b.into_inner().user_id);
    matching_service.pass(user_id, target);

    Ok(success::Success::ok(None).message("User passed"))
}

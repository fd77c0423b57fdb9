use actix_web::{HttpRequest, delete, get, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::{
        block::{
            model::{BlockEnvelope, BlockModel, BlockedUsersEnvelope, ReportModel},
            repository_pg::BlockRepositoryPg,
            service::BlockService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::{Claims, ValidatedJson},
};

pub type BlockSvc = BlockService<BlockRepositoryPg, UserRepositoryPg>;

#[post("/block")]
pub async fn block_user(
    block_service: web::Data<BlockSvc>,
    body: ValidatedJson<BlockModel>,
    req: HttpRequest,
) -> Result<success::Success<BlockEnvelope>, error::Error> {
    let blocker_id = get_extensions::<Claims>(&req)?.sub;
    let BlockModel { user_id, reason } = body.0;
    let block = block_service.block_user(blocker_id, user_id, reason).await?;

    Ok(success::Success::created(Some(BlockEnvelope { block })).message("User blocked successfully"))
}

#[delete("/unblock/{user_id}")]
pub async fn unblock_user(
    block_service: web::Data<BlockSvc>,
    user_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let blocker_id = get_extensions::<Claims>(&req)?.sub;
    block_service.unblock_user(blocker_id, *user_id).await?;

    Ok(success::Success::ok(None).message("User unblocked successfully"))
}

#[get("/blocked")]
pub async fn list_blocked(
    block_service: web::Data<BlockSvc>,
    req: HttpRequest,
) -> Result<success::Success<BlockedUsersEnvelope>, error::Error> {
    let blocker_id = get_extensions::<Claims>(&req)?.sub;
    let blocked_users = block_service.list_blocked(blocker_id).await?;

    Ok(success::Success::ok(Some(BlockedUsersEnvelope { blocked_users })))
}

#[post("/report")]
pub async fn report_user(
    block_service: web::Data<BlockSvc>,
    body: ValidatedJson<ReportModel>,
    req: HttpRequest,
) -> Result<success::Success<BlockEnvelope>, error::Error> {
    let reporter_id = get_extensions::<Claims>(&req)?.sub;
    let ReportModel { user_id, reason } = body.0;
    let block = block_service.report_user(reporter_id, user_id, reason).await?;

    Ok(success::Success::created(Some(BlockEnvelope { block }))
        .message("User reported and blocked successfully"))
}

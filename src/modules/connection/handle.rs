use actix_web::{HttpRequest, get, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::connection::{
        model::{ConnectionEnvelope, ConnectionsEnvelope, RequestsEnvelope},
        repository_pg::ConnectionRepositoryPg,
        service::ConnectionService,
    },
    utils::Claims,
};

pub type ConnectionSvc = ConnectionService<ConnectionRepositoryPg>;

#[get("")]
pub async fn list_connections(
    connection_service: web::Data<ConnectionSvc>,
    req: HttpRequest,
) -> Result<success::Success<ConnectionsEnvelope>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let connections = connection_service.list_connections(user_id).await?;

    Ok(success::Success::ok(Some(ConnectionsEnvelope { connections })))
}

#[get("/requests")]
pub async fn list_requests(
    connection_service: web::Data<ConnectionSvc>,
    req: HttpRequest,
) -> Result<success::Success<RequestsEnvelope>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let requests = connection_service.list_incoming_requests(user_id).await?;

    Ok(success::Success::ok(Some(RequestsEnvelope { requests })))
}

#[post("/requests/{request_id}/accept")]
pub async fn accept_request(
    connection_service: web::Data<ConnectionSvc>,
    request_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<ConnectionEnvelope>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let connection = connection_service.accept_request(user_id, *request_id).await?;

    Ok(success::Success::ok(Some(ConnectionEnvelope { connection }))
        .message("Connection request accepted"))
}

#[post("/requests/{request_id}/ignore")]
pub async fn ignore_request(
    connection_service: web::Data<ConnectionSvc>,
    request_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    connection_service.ignore_request(user_id, *request_id).await?;

    Ok(success::Success::ok(None).message("Connection request ignored"))
}

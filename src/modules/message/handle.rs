use actix_web::{HttpRequest, get, post, web};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_extensions,
    modules::{
        connection::repository_pg::ConnectionRepositoryPg,
        message::{
            model::{
                ConversationsEnvelope, MarkReadModel, MessageEnvelope, MessagesEnvelope,
                SendMessageModel, UpdatedEnvelope,
            },
            repository_pg::MessageRepositoryPg,
            service::MessageService,
        },
    },
    utils::{Claims, ValidatedJson},
};

pub type MessageSvc = MessageService<MessageRepositoryPg, ConnectionRepositoryPg>;

#[get("/conversations")]
pub async fn list_conversations(
    message_service: web::Data<MessageSvc>,
    req: HttpRequest,
) -> Result<success::Success<ConversationsEnvelope>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let conversations = message_service.list_conversations(user_id).await?;

    Ok(success::Success::ok(Some(ConversationsEnvelope { conversations })))
}

#[get("/conversations/{user_id}")]
pub async fn get_conversation(
    message_service: web::Data<MessageSvc>,
    peer_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<MessagesEnvelope>, error::Error> {
    let user_id = get_extensions::<Claims>(&req)?.sub;
    let messages = message_service.list_conversation(user_id, *peer_id).await?;

    Ok(success::Success::ok(Some(MessagesEnvelope { messages })))
}

#[post("/messages")]
pub async fn send_message(
    message_service: web::Data<MessageSvc>,
    body: ValidatedJson<SendMessageModel>,
    req: HttpRequest,
) -> Result<success::Success<MessageEnvelope>, error::Error> {
    let sender_id = get_extensions::<Claims>(&req)?.sub;
    let message =
        message_service.send_message(sender_id, body.0.receiver_id, &body.0.content).await?;

    Ok(success::Success::created(Some(MessageEnvelope { message })))
}

#[post("/messages/read")]
pub async fn mark_read(
    message_service: web::Data<MessageSvc>,
    body: ValidatedJson<MarkReadModel>,
    req: HttpRequest,
) -> Result<success::Success<UpdatedEnvelope>, error::Error> {
    let reader_id = get_extensions::<Claims>(&req)?.sub;
    let updated = message_service.mark_read(reader_id, body.0.sender_id).await?;

    Ok(success::Success::ok(Some(UpdatedEnvelope { updated })))
}

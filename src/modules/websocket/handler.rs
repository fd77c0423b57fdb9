//! `GET /ws`: authenticates, upgrades, then bridges the socket and the session actor.
//! Inbound text frames are parsed and handed to the actor; outbound frames
//! arrive on an mpsc channel and are written to the socket.
use actix::{Actor, Addr};
use actix_web::{Error, HttpRequest, HttpResponse, web};
use actix_ws::Message;
use serde::Deserialize;
use tokio::sync::mpsc;

use super::events::CloseSession;
use super::message::ClientMessage;
use super::server::WebSocketServer;
use super::session::WebSocketSession;
use crate::ENV;
use crate::api::error;
use crate::middlewares::bearer_token;
use crate::modules::message::handle::MessageSvc;
use crate::utils::Claims;

#[derive(Deserialize)]
struct SocketQuery {
    token: Option<String>,
}

/// `?token=` wins over the `Authorization` header.
fn socket_token(req: &HttpRequest) -> Option<String> {
    web::Query::<SocketQuery>::from_query(req.query_string())
        .ok()
        .and_then(|q| q.into_inner().token)
        .filter(|t| !t.is_empty())
        .or_else(|| bearer_token(req).map(str::to_string))
}

/// 1. Resolve and verify the token, 401 before any upgrade.
/// 2. Upgrade and start a session actor wired to an outbound channel.
/// 3. Loop: text frames in go to the actor, channel frames out go to the socket.
/// 4. When the loop ends the actor is stopped, which unregisters it.
pub async fn websocket_handler(
    req: HttpRequest,
    stream: web::Payload,
    server: web::Data<Addr<WebSocketServer>>,
    message_service: web::Data<MessageSvc>,
) -> Result<HttpResponse, Error> {
    let token = socket_token(&req).ok_or_else(|| error::Error::unauthorized("No token provided"))?;
    let claims = Claims::decode(&token, ENV.jwt_secret.as_ref())
        .map_err(|_| error::Error::unauthorized("Invalid token"))?;

    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(&req, stream)?;

    // actor -> socket
    let (tx, mut rx) = mpsc::unbounded_channel::<String>();
    let addr =
        WebSocketSession::new(claims.sub, server.get_ref().clone(), tx, message_service).start();

    actix_web::rt::spawn(async move {
        loop {
            tokio::select! {
                msg = msg_stream.recv() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            match serde_json::from_str::<ClientMessage>(&text) {
                                Ok(client_msg) => addr.do_send(client_msg),
                                Err(e) => {
                                    let preview: String = text.chars().take(100).collect();
                                    tracing::warn!("Unparseable frame ignored: {} - raw: {}", e, preview);
                                }
                            }
                        }

                        Some(Ok(Message::Ping(data))) => {
                            if let Err(e) = ws_session.pong(&data).await {
                                tracing::error!("Cannot send pong: {}", e);
                                break;
                            }
                        }

                        Some(Ok(Message::Close(reason))) => {
                            tracing::info!("WebSocket close frame: {:?}", reason);
                            break;
                        }

                        Some(Ok(Message::Binary(_))) => {
                            tracing::warn!("Binary frames are not supported");
                        }

                        Some(Ok(Message::Pong(_) | Message::Continuation(_) | Message::Nop)) => {}

                        Some(Err(e)) => {
                            tracing::error!("WebSocket protocol error: {}", e);
                            break;
                        }

                        None => break,
                    }
                }

                Some(json) = rx.recv() => {
                    if ws_session.text(json).await.is_err() {
                        tracing::error!("Cannot write to WebSocket client");
                        break;
                    }
                }
            }
        }

        addr.do_send(CloseSession);
        let _ = ws_session.close(None).await;
        tracing::debug!("WebSocket loop finished");
    });

    tracing::info!("WebSocket connection established for user {}", claims.sub);
    Ok(response)
}

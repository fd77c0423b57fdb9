use actix::Actor;
use actix_cors::Cors;
use actix_web::{
    self, App, HttpServer, http::header,
    middleware::from_fn,
    web::{self, ServiceConfig},
};
use std::sync::{Arc, LazyLock};

use crate::{
    configs::{connect_database, init_logging},
    middlewares::{access_logger, authentication},
    modules::{
        block::{repository_pg::BlockRepositoryPg, service::BlockService},
        connection::{repository_pg::ConnectionRepositoryPg, service::ConnectionService},
        lesson::{repository_pg::LessonRepositoryPg, service::LessonService},
        matching::{repository_pg::MatchingRepositoryPg, service::MatchingService},
        message::{repository_pg::MessageRepositoryPg, service::MessageService},
        user::{repository_pg::UserRepositoryPg, service::UserService},
        websocket::{handler::websocket_handler, server::WebSocketServer},
    },
};

mod api;
mod configs;
mod constants;
mod middlewares;
mod modules;
#[cfg(test)]
mod test;
mod utils;

pub static ENV: LazyLock<constants::Env> = LazyLock::new(|| {
    dotenvy::dotenv().ok();
    constants::Env::default()
});

#[actix_web::get("/")]
async fn health_check() -> &'static str {
    "Server is running"
}

fn cors() -> Cors {
    ENV.frontend_urls
        .iter()
        .fold(Cors::default(), |cors, origin| cors.allowed_origin(origin))
        .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .supports_credentials()
        .max_age(3600)
}

/// Public auth routes, then everything else behind the bearer token check.
fn configure_api(cfg: &mut ServiceConfig) {
    cfg.service(
        web::scope("/api").configure(modules::user::route::public_api_configure).service(
            web::scope("")
                .wrap(from_fn(authentication))
                .configure(modules::user::route::configure)
                .configure(modules::matching::route::configure)
                .configure(modules::connection::route::configure)
                .configure(modules::message::route::configure)
                .configure(modules::block::route::configure)
                .configure(modules::lesson::route::configure),
        ),
    );
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    init_logging();

    let db_pool =
        connect_database().await.map_err(|_| std::io::Error::other("Database connection error"))?;
    log::info!("Environment variables loaded, {} allowed origins", ENV.frontend_urls.len());

    let user_repo = Arc::new(UserRepositoryPg::new(db_pool.clone()));
    let connection_repo = Arc::new(ConnectionRepositoryPg::new(db_pool.clone()));
    let matching_repo = Arc::new(MatchingRepositoryPg::new(db_pool.clone()));
    let message_repo = Arc::new(MessageRepositoryPg::new(db_pool.clone()));
    let block_repo = Arc::new(BlockRepositoryPg::new(db_pool.clone()));
    let lesson_repo = Arc::new(LessonRepositoryPg::new(db_pool.clone()));

    let ws_server = WebSocketServer::new().start();

    let user_service = UserService::with_dependencies(
        user_repo.clone(),
        connection_repo.clone(),
        &ENV.jwt_secret,
        ENV.token_expiration,
    );
    let matching_service = MatchingService::with_dependencies(
        matching_repo,
        connection_repo.clone(),
        block_repo.clone(),
        user_repo.clone(),
    );
    let connection_service = ConnectionService::with_dependencies(connection_repo.clone());
    let message_service = MessageService::with_dependencies(
        message_repo,
        connection_repo,
        Arc::new(ws_server.clone()),
    );
    let block_service = BlockService::with_dependencies(block_repo, user_repo);
    let lesson_service = LessonService::with_dependencies(lesson_repo);

    log::info!("Starting server at http://{}:{}", ENV.ip.as_str(), ENV.port);
    HttpServer::new(move || {
        App::new()
            .wrap(access_logger())
            .wrap(cors())
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(matching_service.clone()))
            .app_data(web::Data::new(connection_service.clone()))
            .app_data(web::Data::new(message_service.clone()))
            .app_data(web::Data::new(block_service.clone()))
            .app_data(web::Data::new(lesson_service.clone()))
            .app_data(web::Data::new(ws_server.clone()))
            .service(health_check)
            .route("/ws", web::get().to(websocket_handler))
            .configure(configure_api)
    })
    .bind((ENV.ip.as_str(), ENV.port))?
    .workers(2)
    .run()
    .await
}

use sqlx::{PgPool, postgres::PgPoolOptions};

use crate::{ENV, api::error};

pub async fn connect_database() -> Result<PgPool, error::SystemError> {
    let database_url = &ENV.database_url;
    let pool = PgPoolOptions::new()
        .max_connections(ENV.database_max_connections)
        .min_connections(1)
        .acquire_slow_threshold(std::time::Duration::from_secs(3))
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    log::info!("Database connected and migrations applied");

    Ok(pool)
}

/// `log` records go through env_logger, `tracing` events (real-time layer)
/// through the fmt subscriber. Both honour `RUST_LOG`.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let subscriber = tracing_subscriber::fmt().with_target(false).finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        log::warn!("tracing subscriber already installed");
    }
}

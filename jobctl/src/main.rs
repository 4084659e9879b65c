use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use engine_api::InMemoryEngine;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

use jobctl::api::server::{ApiServer, ApiServerConfig};
use jobctl::api::AppState;
use jobctl::database::{self, repositories::SqlxQueueStateRepository};
use jobctl::logging;
use jobctl::queue::{QueueEventBroadcaster, QueueService, QueueStateStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let log_dir = std::env::var("LOG_DIR").ok().map(PathBuf::from);
    let (logging_config, _guard) =
        logging::init(log_dir.as_deref()).context("failed to initialize logging")?;

    info!("jobctl {} starting", env!("CARGO_PKG_VERSION"));

    let database_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:jobctl.db?mode=rwc".to_string());

    let pool = database::init_pool(&database_url)
        .await
        .context("failed to open database")?;
    database::run_migrations(&pool)
        .await
        .context("failed to run database migrations")?;

    let repository = Arc::new(SqlxQueueStateRepository::new(pool.clone()));
    let events = QueueEventBroadcaster::new();

    let mut event_rx = events.subscribe();
    tokio::spawn(async move {
        while let Ok(event) = event_rx.recv().await {
            debug!("queue event: {}", event.description());
        }
    });

    let store = Arc::new(
        QueueStateStore::load(repository, events)
            .await
            .context("failed to load queue state")?,
    );

    let engine = Arc::new(InMemoryEngine::new());
    let service = Arc::new(QueueService::new(store, engine));

    let state = AppState::new(service).with_logging_config(logging_config);
    let server = ApiServer::new(ApiServerConfig::from_env_or_default(), state);

    let cancel_token = server.cancel_token();
    spawn_signal_handler(cancel_token.clone());

    if let Err(e) = server.run().await {
        error!("API server error: {}", e);
        return Err(e.into());
    }

    info!("jobctl stopped");
    Ok(())
}

fn spawn_signal_handler(cancel_token: CancellationToken) {
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("shutdown signal received");
        cancel_token.cancel();
    });
}

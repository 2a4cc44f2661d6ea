//! Serves the `TaskSense` REST API.
//!
//! Reads `.env`, then [`AppConfig`] from `tasksense.toml` and `TASKSENSE_*`
//! variables. Tasks are stored in `PostgreSQL` when `TASKSENSE_DATABASE_URL`
//! is set and in memory otherwise.

use diesel::{
    PgConnection,
    r2d2::{ConnectionManager, Pool},
};
use mockable::DefaultClock;
use std::sync::Arc;
use tasksense::{
    config::AppConfig,
    http::{AppState, create_router},
    task::{
        adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
        ports::TaskRepository,
        services::TaskLifecycleService,
    },
    telemetry,
};
use tokio::net::TcpListener;
use tracing::{info, warn};

/// Boxed error type for the main result.
type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let dotenv_loaded = dotenvy::dotenv().is_ok();
    let config = AppConfig::load()?;
    telemetry::init(config.is_production());
    if dotenv_loaded {
        info!("loaded .env");
    }

    match config.database_url.as_deref() {
        Some(url) => {
            let pool = Pool::builder()
                .max_size(config.database_pool_size)
                .build(ConnectionManager::<PgConnection>::new(url))?;
            info!(pool_size = config.database_pool_size, "using PostgreSQL task store");
            serve(PostgresTaskRepository::new(pool), &config).await
        }
        None => {
            warn!("TASKSENSE_DATABASE_URL not set; tasks are kept in memory only");
            serve(InMemoryTaskRepository::new(), &config).await
        }
    }
}

async fn serve<R>(repository: R, config: &AppConfig) -> Result<(), BoxError>
where
    R: TaskRepository + 'static,
{
    let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock));
    let router = create_router(
        AppState::new(service, &config.environment),
        &config.allowed_origins,
    );

    let address = config.bind_address();
    let listener = TcpListener::bind(&address).await?;
    info!(%address, environment = %config.environment, "TaskSense API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("TaskSense API stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("received Ctrl+C, shutting down"),
        Err(err) => warn!(error = %err, "failed to listen for Ctrl+C; shutting down"),
    }
}

//! REST boundary for the task API.
//!
//! The router is generic over the task repository and clock so the same
//! routes serve the in-memory and `PostgreSQL` adapters.
//!
//! ```ignore
//! let service = TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock));
//! let router = create_router(AppState::new(service, "development"), &origins);
//! axum::serve(listener, router).await?;
//! ```

pub mod dto;
pub mod envelope;
pub mod error;
pub mod handlers;

#[cfg(test)]
mod tests;

pub use dto::{CreateTaskPayload, FieldError, ListTasksQuery, UpdateTaskPayload};
pub use envelope::Envelope;
pub use error::ApiError;

use crate::task::{ports::TaskRepository, services::TaskLifecycleService};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use mockable::Clock;
use std::sync::Arc;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Shared handler state.
pub struct AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Task lifecycle service.
    pub service: TaskLifecycleService<R, C>,
    /// Deployment environment reported by `/health`.
    pub environment: Arc<str>,
}

impl<R, C> Clone for AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            environment: Arc::clone(&self.environment),
        }
    }
}

impl<R, C> AppState<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates handler state.
    #[must_use]
    pub fn new(service: TaskLifecycleService<R, C>, environment: &str) -> Self {
        Self {
            service,
            environment: Arc::from(environment),
        }
    }
}

/// Builds the API router with tracing and CORS middleware.
#[must_use]
pub fn create_router<R, C>(state: AppState<R, C>, allowed_origins: &[String]) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = Router::new()
        .route(
            "/",
            get(handlers::list_tasks::<R, C>).post(handlers::create_task::<R, C>),
        )
        .route("/stats", get(handlers::task_stats::<R, C>))
        .route(
            "/{id}",
            get(handlers::get_task::<R, C>)
                .patch(handlers::update_task::<R, C>)
                .delete(handlers::delete_task::<R, C>),
        );

    Router::new()
        .route("/", get(handlers::welcome))
        .route("/health", get(handlers::health::<R, C>))
        .nest("/api/tasks", tasks)
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(allowed_origins))
        .with_state(state)
}

/// Builds a CORS layer admitting the configured origins.
///
/// A `*` entry admits every origin by echoing the request's `Origin`, since
/// credentials rule out a literal wildcard. Origins that are not valid header
/// values are skipped with a warning.
#[must_use]
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allow_origin(allowed_origins))
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}

fn allow_origin(allowed_origins: &[String]) -> AllowOrigin {
    if allowed_origins.iter().any(|origin| origin == "*") {
        return AllowOrigin::mirror_request();
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| warn!(%origin, "ignoring invalid CORS origin"))
                .ok()
        })
        .collect();
    AllowOrigin::list(origins)
}

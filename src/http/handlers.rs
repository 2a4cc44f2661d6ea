//! Request handlers for the task API.

use super::{
    AppState,
    dto::{CreateTaskPayload, ListTasksQuery, UpdateTaskPayload},
    envelope::Envelope,
    error::ApiError,
};
use crate::task::{
    domain::{Task, TaskId, TaskStats},
    ports::TaskRepository,
    services::TaskWithHistory,
};
use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{StatusCode, Uri},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;

/// Body of `GET /health`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    success: bool,
    message: &'static str,
    timestamp: DateTime<Utc>,
    environment: String,
}

/// Body of `GET /`.
#[derive(Debug, Serialize)]
pub struct WelcomeResponse {
    success: bool,
    message: &'static str,
    version: &'static str,
    endpoints: Endpoints,
}

#[derive(Debug, Serialize)]
struct Endpoints {
    health: &'static str,
    tasks: &'static str,
    stats: &'static str,
}

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

/// Reports liveness together with the running environment.
pub async fn health<R, C>(State(state): State<AppState<R, C>>) -> Json<HealthResponse>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Json(HealthResponse {
        success: true,
        message: "TaskSense API is running",
        timestamp: state.service.clock().utc(),
        environment: state.environment.to_string(),
    })
}

/// Lists the available endpoints.
pub async fn welcome() -> Json<WelcomeResponse> {
    Json(WelcomeResponse {
        success: true,
        message: "Welcome to TaskSense API",
        version: env!("CARGO_PKG_VERSION"),
        endpoints: Endpoints {
            health: "/health",
            tasks: "/api/tasks",
            stats: "/api/tasks/stats",
        },
    })
}

/// Answers requests that match no route.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<Envelope<()>>) {
    (
        StatusCode::NOT_FOUND,
        Json(Envelope::failure(format!("Route {uri} not found"))),
    )
}

/// `POST /api/tasks`
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for rejected fields and
/// [`ApiError::Lifecycle`] when the store fails.
pub async fn create_task<R, C>(
    State(state): State<AppState<R, C>>,
    body: Result<Json<CreateTaskPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Task>>), ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Json(payload) = body.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;
    let request = payload.validate().map_err(ApiError::Validation)?;
    let task = state.service.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(Envelope::data(task).with_message("Task created successfully")),
    ))
}

/// `GET /api/tasks`
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for unknown filter values and
/// [`ApiError::Lifecycle`] when the store fails.
pub async fn list_tasks<R, C>(
    State(state): State<AppState<R, C>>,
    params: Result<Query<ListTasksQuery>, QueryRejection>,
) -> ApiResult<Vec<Task>>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let Query(query) = params.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;
    let filter = query.validate().map_err(ApiError::Validation)?;
    let tasks = state.service.list(&filter).await?;
    let count = tasks.len();
    Ok(Json(Envelope::data(tasks).with_count(count)))
}

/// `GET /api/tasks/{id}`
///
/// # Errors
///
/// Returns [`ApiError::TaskNotFound`] for identifiers that are not UUIDs and
/// [`ApiError::Lifecycle`] otherwise.
pub async fn get_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
) -> ApiResult<TaskWithHistory>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = parse_id(&id)?;
    let task = state.service.get_by_id(task_id).await?;
    Ok(Json(Envelope::data(task)))
}

/// `PATCH /api/tasks/{id}`
///
/// # Errors
///
/// Returns [`ApiError::Validation`] for rejected fields,
/// [`ApiError::TaskNotFound`] for malformed identifiers, and
/// [`ApiError::Lifecycle`] otherwise.
pub async fn update_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
    body: Result<Json<UpdateTaskPayload>, JsonRejection>,
) -> ApiResult<Task>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = parse_id(&id)?;
    let Json(payload) = body.map_err(|rejection| ApiError::Malformed(rejection.body_text()))?;
    let changes = payload.validate().map_err(ApiError::Validation)?;
    let task = state.service.update(task_id, changes).await?;
    Ok(Json(
        Envelope::data(task).with_message("Task updated successfully"),
    ))
}

/// `DELETE /api/tasks/{id}`
///
/// # Errors
///
/// Returns [`ApiError::TaskNotFound`] when no such task exists and
/// [`ApiError::Lifecycle`] when the store fails.
pub async fn delete_task<R, C>(
    State(state): State<AppState<R, C>>,
    Path(id): Path<String>,
) -> ApiResult<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task_id = parse_id(&id)?;
    state.service.delete(task_id).await?;
    Ok(Json(Envelope::message("Task deleted successfully")))
}

/// `GET /api/tasks/stats`
///
/// # Errors
///
/// Returns [`ApiError::Lifecycle`] when the store fails.
pub async fn task_stats<R, C>(State(state): State<AppState<R, C>>) -> ApiResult<TaskStats>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let stats = state.service.stats().await?;
    Ok(Json(Envelope::data(stats)))
}

fn parse_id(raw: &str) -> Result<TaskId, ApiError> {
    TaskId::parse(raw).ok_or(ApiError::TaskNotFound)
}

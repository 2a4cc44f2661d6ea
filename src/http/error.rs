//! Mapping from request and lifecycle failures to HTTP responses.

use super::{dto::FieldError, envelope::Envelope};
use crate::task::services::TaskLifecycleError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{debug, error};

/// Errors returned by request handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more request fields were rejected.
    #[error("request validation failed")]
    Validation(Vec<FieldError>),

    /// The request body or query string could not be decoded.
    #[error("{0}")]
    Malformed(String),

    /// The path does not name an existing task.
    #[error("Task not found")]
    TaskNotFound,

    /// The lifecycle service failed.
    #[error(transparent)]
    Lifecycle(#[from] TaskLifecycleError),
}

impl ApiError {
    /// Returns the status code this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::Malformed(_) => StatusCode::BAD_REQUEST,
            Self::TaskNotFound | Self::Lifecycle(TaskLifecycleError::NotFound(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Lifecycle(TaskLifecycleError::Store { .. }) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            Self::Validation(errors) => Envelope::rejected(errors),
            Self::Malformed(message) => Envelope::failure(message),
            Self::TaskNotFound => Envelope::failure("Task not found"),
            Self::Lifecycle(err @ TaskLifecycleError::NotFound(_)) => {
                debug!(error = %err, "task lookup missed");
                Envelope::failure("Task not found")
            }
            Self::Lifecycle(err @ TaskLifecycleError::Store { .. }) => {
                error!(error = %err, "task store failure");
                Envelope::failure(capitalise(&err.to_string()))
            }
        };
        (status, Json(body)).into_response()
    }
}

fn capitalise(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

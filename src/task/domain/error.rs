//! Error types for task domain parsing.

use thiserror::Error;

/// Error returned while parsing an enumerated task field from its string
/// representation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task {field}: {value}")]
pub struct ParseTaskFieldError {
    /// Name of the field being parsed (`status`, `category`, `priority`).
    pub field: &'static str,
    /// The rejected raw value.
    pub value: String,
}

impl ParseTaskFieldError {
    pub(crate) fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_owned(),
        }
    }
}

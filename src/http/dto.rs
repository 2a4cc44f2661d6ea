//! Request payloads and their boundary validation.
//!
//! Payload fields are read as loose strings so that every invalid field can
//! be reported at once, rather than failing on the first type mismatch.

use crate::task::{
    domain::{TaskCategory, TaskFilter, TaskPriority, TaskStatus},
    services::{CreateTaskRequest, TaskChanges},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Longest accepted title, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// A single rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable reason.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Body of `POST /api/tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskPayload {
    /// Task title.
    pub title: Option<String>,
    /// Task description.
    pub description: Option<String>,
    /// Assignee.
    pub assigned_to: Option<String>,
    /// ISO-8601 due date.
    pub due_date: Option<String>,
    /// Initial status.
    pub status: Option<String>,
}

impl CreateTaskPayload {
    /// Validates the payload into a service request.
    ///
    /// # Errors
    ///
    /// Returns every field that failed validation.
    pub fn validate(self) -> Result<CreateTaskRequest, Vec<FieldError>> {
        let mut errors = Vec::new();

        let title = match self.title.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FieldError::new("title", "Title is required"));
                None
            }
            Some(title) => check_title(title, &mut errors),
        };
        let status = self
            .status
            .as_deref()
            .and_then(|raw| parse_enum("status", raw, &mut errors, TaskStatus::try_from));
        let due_date = self
            .due_date
            .as_deref()
            .and_then(|raw| parse_due_date(raw, &mut errors));

        let Some(title) = title.filter(|_| errors.is_empty()) else {
            return Err(errors);
        };

        let mut request = CreateTaskRequest::new(title);
        if let Some(description) = non_blank(self.description.as_deref()) {
            request = request.with_description(description);
        }
        if let Some(assigned_to) = non_blank(self.assigned_to.as_deref()) {
            request = request.with_assigned_to(assigned_to);
        }
        if let Some(status) = status {
            request = request.with_status(status);
        }
        if let Some(due_date) = due_date {
            request = request.with_due_date(due_date);
        }
        Ok(request)
    }
}

/// Body of `PATCH /api/tasks/{id}`.
///
/// Unknown keys are ignored. For nullable fields an explicit `null` clears
/// the stored value while an absent key leaves it untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskPayload {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement or cleared description.
    #[serde(default, deserialize_with = "nullable")]
    pub description: Option<Option<String>>,
    /// Replacement status.
    pub status: Option<String>,
    /// Pinned category.
    pub category: Option<String>,
    /// Pinned priority.
    pub priority: Option<String>,
    /// Replacement or cleared assignee.
    #[serde(default, deserialize_with = "nullable")]
    pub assigned_to: Option<Option<String>>,
    /// Replacement or cleared ISO-8601 due date.
    #[serde(default, deserialize_with = "nullable")]
    pub due_date: Option<Option<String>>,
    /// Suppresses re-classification.
    #[serde(default, rename = "manualOverride", alias = "manual_override")]
    pub manual_override: bool,
}

impl UpdateTaskPayload {
    /// Validates the payload into service changes.
    ///
    /// # Errors
    ///
    /// Returns every field that failed validation.
    pub fn validate(self) -> Result<TaskChanges, Vec<FieldError>> {
        let mut errors = Vec::new();
        let mut changes = TaskChanges::new().with_manual_override(self.manual_override);

        if let Some(raw) = self.title.as_deref().map(str::trim) {
            if raw.is_empty() {
                errors.push(FieldError::new("title", "Title cannot be empty"));
            } else if let Some(title) = check_title(raw, &mut errors) {
                changes = changes.with_title(title);
            }
        }
        if let Some(description) = self.description {
            changes = match non_blank(description.as_deref()) {
                Some(text) => changes.with_description(text),
                None => changes.without_description(),
            };
        }
        if let Some(assigned_to) = self.assigned_to {
            changes = match non_blank(assigned_to.as_deref()) {
                Some(assignee) => changes.with_assigned_to(assignee),
                None => changes.without_assigned_to(),
            };
        }
        if let Some(requested) = self.due_date {
            match requested {
                Some(raw) => {
                    if let Some(parsed) = parse_due_date(&raw, &mut errors) {
                        changes = changes.with_due_date(parsed);
                    }
                }
                None => changes = changes.without_due_date(),
            }
        }
        if let Some(status) = self
            .status
            .as_deref()
            .and_then(|raw| parse_enum("status", raw, &mut errors, TaskStatus::try_from))
        {
            changes = changes.with_status(status);
        }
        if let Some(category) = self
            .category
            .as_deref()
            .and_then(|raw| parse_enum("category", raw, &mut errors, TaskCategory::try_from))
        {
            changes = changes.with_category(category);
        }
        if let Some(priority) = self
            .priority
            .as_deref()
            .and_then(|raw| parse_enum("priority", raw, &mut errors, TaskPriority::try_from))
        {
            changes = changes.with_priority(priority);
        }

        if errors.is_empty() {
            Ok(changes)
        } else {
            Err(errors)
        }
    }
}

/// Query string of `GET /api/tasks`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksQuery {
    /// Status filter.
    pub status: Option<String>,
    /// Category filter.
    pub category: Option<String>,
    /// Priority filter.
    pub priority: Option<String>,
    /// Assignee filter.
    pub assigned_to: Option<String>,
}

impl ListTasksQuery {
    /// Validates the query into a task filter.
    ///
    /// Empty parameters are treated as absent.
    ///
    /// # Errors
    ///
    /// Returns every parameter holding an unknown enumeration value.
    pub fn validate(self) -> Result<TaskFilter, Vec<FieldError>> {
        let mut errors = Vec::new();
        let filter = TaskFilter {
            status: present(self.status.as_deref())
                .and_then(|raw| parse_enum("status", raw, &mut errors, TaskStatus::try_from)),
            category: present(self.category.as_deref())
                .and_then(|raw| parse_enum("category", raw, &mut errors, TaskCategory::try_from)),
            priority: present(self.priority.as_deref())
                .and_then(|raw| parse_enum("priority", raw, &mut errors, TaskPriority::try_from)),
            assigned_to: non_blank(self.assigned_to.as_deref()).map(str::to_owned),
        };

        if errors.is_empty() {
            Ok(filter)
        } else {
            Err(errors)
        }
    }
}

fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|trimmed| !trimmed.is_empty())
}

/// Keeps a value untrimmed unless it is blank.
fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|raw| !raw.trim().is_empty())
}

fn check_title(title: &str, errors: &mut Vec<FieldError>) -> Option<String> {
    if title.chars().count() > MAX_TITLE_LENGTH {
        errors.push(FieldError::new(
            "title",
            "Title must be less than 255 characters",
        ));
        return None;
    }
    Some(title.to_owned())
}

fn parse_enum<'a, T, E>(
    field: &'static str,
    raw: &'a str,
    errors: &mut Vec<FieldError>,
    parse: impl FnOnce(&'a str) -> Result<T, E>,
) -> Option<T> {
    if let Ok(value) = parse(raw) {
        return Some(value);
    }
    let message = match field {
        "status" => "Status must be pending, in_progress, or completed".to_owned(),
        other => format!("Invalid {other}"),
    };
    errors.push(FieldError::new(field, message));
    None
}

/// Parses an ISO-8601 timestamp or calendar date into UTC.
///
/// Date-times without an offset are taken as UTC and a bare date as
/// midnight UTC.
fn parse_due_date(raw: &str, errors: &mut Vec<FieldError>) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"]
                .into_iter()
                .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
                .map(|naive| naive.and_utc())
        })
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc())
        });

    if parsed.is_none() {
        errors.push(FieldError::new(
            "due_date",
            "Due date must be a valid ISO 8601 date",
        ));
    }
    parsed
}

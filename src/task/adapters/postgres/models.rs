//! Diesel row models for task persistence.

use super::schema::{task_history, tasks};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde_json::Value;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Category value.
    pub category: String,
    /// Priority value.
    pub priority: String,
    /// Status value.
    pub status: String,
    /// Optional assignee.
    pub assigned_to: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Extracted entities JSON payload.
    pub extracted_entities: Value,
    /// Suggested actions JSON payload.
    pub suggested_actions: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Category value.
    pub category: String,
    /// Priority value.
    pub priority: String,
    /// Status value.
    pub status: String,
    /// Optional assignee.
    pub assigned_to: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Extracted entities JSON payload.
    pub extracted_entities: Value,
    /// Suggested actions JSON payload.
    pub suggested_actions: Value,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Full-row changeset written after a patch has been applied.
///
/// `None` values are written as `NULL` so cleared fields are persisted.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
#[diesel(treat_none_as_null = true)]
pub struct TaskChangeset {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Category value.
    pub category: String,
    /// Priority value.
    pub priority: String,
    /// Status value.
    pub status: String,
    /// Optional assignee.
    pub assigned_to: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Extracted entities JSON payload.
    pub extracted_entities: Value,
    /// Suggested actions JSON payload.
    pub suggested_actions: Value,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for task history entries.
///
/// `sequence` is left to its database default on insert.
#[derive(Debug, Clone, Queryable, Selectable, Insertable)]
#[diesel(table_name = task_history)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskHistoryRow {
    /// History entry identifier.
    pub id: uuid::Uuid,
    /// Task the change belongs to.
    pub task_id: uuid::Uuid,
    /// Name of the changed field.
    pub field_name: String,
    /// Value before the change.
    pub old_value: Option<String>,
    /// Value after the change.
    pub new_value: Option<String>,
    /// When the change was applied.
    pub changed_at: DateTime<Utc>,
}

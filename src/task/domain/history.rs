//! Change-history records kept alongside each task.

use super::TaskId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a task history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskHistoryId(Uuid);

impl TaskHistoryId {
    /// Creates a new random history identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a history identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl Default for TaskHistoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskHistoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single field-level change produced by applying a [`super::TaskPatch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskFieldChange {
    /// Name of the changed field.
    pub field_name: &'static str,
    /// Value before the change, if any.
    pub old_value: Option<String>,
    /// Value after the change, if any.
    pub new_value: Option<String>,
}

impl TaskFieldChange {
    /// Converts the change into a persisted history entry.
    #[must_use]
    pub fn into_entry(self, task_id: TaskId, changed_at: DateTime<Utc>) -> TaskHistoryEntry {
        TaskHistoryEntry {
            id: TaskHistoryId::new(),
            task_id,
            field_name: self.field_name.to_owned(),
            old_value: self.old_value,
            new_value: self.new_value,
            changed_at,
        }
    }
}

/// Persisted record of one field change on a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHistoryEntry {
    /// History entry identifier.
    pub id: TaskHistoryId,
    /// Task the change belongs to.
    pub task_id: TaskId,
    /// Name of the changed field.
    pub field_name: String,
    /// Value before the change.
    pub old_value: Option<String>,
    /// Value after the change.
    pub new_value: Option<String>,
    /// When the change was applied.
    pub changed_at: DateTime<Utc>,
}

//! Task record and its construction and update rules.

use super::{
    ClassificationSnapshot, TaskCategory, TaskFieldChange, TaskId, TaskPatch, TaskPriority,
    TaskStatus,
};
use crate::classification::{ClassificationResult, ExtractedEntities};
use chrono::{DateTime, SecondsFormat, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A tracked task together with its classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    title: String,
    description: Option<String>,
    category: TaskCategory,
    priority: TaskPriority,
    status: TaskStatus,
    assigned_to: Option<String>,
    due_date: Option<DateTime<Utc>>,
    extracted_entities: ExtractedEntities,
    suggested_actions: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskData {
    /// Task title.
    pub title: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// Initial status; defaults to [`TaskStatus::Pending`].
    pub status: Option<TaskStatus>,
    /// Optional assignee.
    pub assigned_to: Option<String>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted category.
    pub category: TaskCategory,
    /// Persisted priority.
    pub priority: TaskPriority,
    /// Persisted status.
    pub status: TaskStatus,
    /// Persisted assignee.
    pub assigned_to: Option<String>,
    /// Persisted due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Persisted extracted entities.
    pub extracted_entities: ExtractedEntities,
    /// Persisted suggested actions.
    pub suggested_actions: Vec<String>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task from caller data and its classification.
    ///
    /// Category and priority always come from the classification.
    #[must_use]
    pub fn new(data: NewTaskData, classification: ClassificationResult, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            title: data.title,
            description: data.description,
            category: classification.category,
            priority: classification.priority,
            status: data.status.unwrap_or_default(),
            assigned_to: data.assigned_to,
            due_date: data.due_date,
            extracted_entities: classification.extracted_entities,
            suggested_actions: classification.suggested_actions,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            title: data.title,
            description: data.description,
            category: data.category,
            priority: data.priority,
            status: data.status,
            assigned_to: data.assigned_to,
            due_date: data.due_date,
            extracted_entities: data.extracted_entities,
            suggested_actions: data.suggested_actions,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the category.
    #[must_use]
    pub const fn category(&self) -> TaskCategory {
        self.category
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> TaskPriority {
        self.priority
    }

    /// Returns the status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the assignee, if any.
    #[must_use]
    pub fn assigned_to(&self) -> Option<&str> {
        self.assigned_to.as_deref()
    }

    /// Returns the due date, if any.
    #[must_use]
    pub const fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    /// Returns the entities extracted at the last classification.
    #[must_use]
    pub const fn extracted_entities(&self) -> &ExtractedEntities {
        &self.extracted_entities
    }

    /// Returns the actions suggested at the last classification.
    #[must_use]
    pub fn suggested_actions(&self) -> &[String] {
        &self.suggested_actions
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Applies a partial update and returns the scalar fields that changed.
    ///
    /// Fields whose new value equals the current one produce no change
    /// record. Classification artefacts are replaced without a change record.
    /// `updated_at` is always set to `changed_at`.
    pub fn apply(&mut self, patch: &TaskPatch, changed_at: DateTime<Utc>) -> Vec<TaskFieldChange> {
        let mut changes = Vec::new();

        if let Some(title) = &patch.title
            && *title != self.title
        {
            changes.push(change("title", Some(self.title.clone()), Some(title.clone())));
            self.title.clone_from(title);
        }
        if let Some(description) = &patch.description
            && *description != self.description
        {
            changes.push(change(
                "description",
                self.description.clone(),
                description.clone(),
            ));
            self.description.clone_from(description);
        }
        if let Some(status) = patch.status {
            set_enum(&mut changes, "status", &mut self.status, status, TaskStatus::as_str);
        }
        if let Some(assigned_to) = &patch.assigned_to
            && *assigned_to != self.assigned_to
        {
            changes.push(change(
                "assigned_to",
                self.assigned_to.clone(),
                assigned_to.clone(),
            ));
            self.assigned_to.clone_from(assigned_to);
        }
        if let Some(due_date) = patch.due_date
            && due_date != self.due_date
        {
            changes.push(change(
                "due_date",
                self.due_date.map(format_timestamp),
                due_date.map(format_timestamp),
            ));
            self.due_date = due_date;
        }
        if let Some(category) = patch.category {
            set_enum(
                &mut changes,
                "category",
                &mut self.category,
                category,
                TaskCategory::as_str,
            );
        }
        if let Some(priority) = patch.priority {
            set_enum(
                &mut changes,
                "priority",
                &mut self.priority,
                priority,
                TaskPriority::as_str,
            );
        }
        if let Some(ClassificationSnapshot {
            extracted_entities,
            suggested_actions,
        }) = &patch.classification
        {
            self.extracted_entities.clone_from(extracted_entities);
            self.suggested_actions.clone_from(suggested_actions);
        }

        self.updated_at = changed_at;
        changes
    }
}

const fn change(
    field_name: &'static str,
    old_value: Option<String>,
    new_value: Option<String>,
) -> TaskFieldChange {
    TaskFieldChange {
        field_name,
        old_value,
        new_value,
    }
}

fn set_enum<T: Copy + PartialEq>(
    changes: &mut Vec<TaskFieldChange>,
    field_name: &'static str,
    current: &mut T,
    next: T,
    as_str: fn(T) -> &'static str,
) {
    if *current == next {
        return;
    }
    changes.push(change(
        field_name,
        Some(as_str(*current).to_owned()),
        Some(as_str(next).to_owned()),
    ));
    *current = next;
}

fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)
}

//! Partial updates applied to stored tasks.

use super::{TaskCategory, TaskPriority, TaskStatus};
use crate::classification::{ClassificationResult, ExtractedEntities};
use chrono::{DateTime, Utc};

/// Classification artefacts that are always replaced together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationSnapshot {
    /// Entities extracted from the task text.
    pub extracted_entities: ExtractedEntities,
    /// Actions suggested for the task's category.
    pub suggested_actions: Vec<String>,
}

impl From<ClassificationResult> for ClassificationSnapshot {
    fn from(result: ClassificationResult) -> Self {
        Self {
            extracted_entities: result.extracted_entities,
            suggested_actions: result.suggested_actions,
        }
    }
}

/// Merged partial update handed to the task store.
///
/// `None` leaves a field untouched. For nullable fields the inner `Option`
/// distinguishes setting a value from clearing it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement status.
    pub status: Option<TaskStatus>,
    /// Replacement or cleared assignee.
    pub assigned_to: Option<Option<String>>,
    /// Replacement or cleared due date.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Replacement category.
    pub category: Option<TaskCategory>,
    /// Replacement priority.
    pub priority: Option<TaskPriority>,
    /// Fresh classification artefacts.
    pub classification: Option<ClassificationSnapshot>,
}

impl TaskPatch {
    /// Merges a fresh classification into the patch.
    ///
    /// The classifier's category and priority fill only the slots the caller
    /// left empty; extracted entities and suggested actions are always
    /// replaced.
    pub fn merge_classification(&mut self, result: ClassificationResult) {
        self.category.get_or_insert(result.category);
        self.priority.get_or_insert(result.priority);
        self.classification = Some(ClassificationSnapshot::from(result));
    }

    /// Returns `true` when applying the patch would change nothing but the
    /// update timestamp.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assigned_to.is_none()
            && self.due_date.is_none()
            && self.category.is_none()
            && self.priority.is_none()
            && self.classification.is_none()
    }
}

//! Exact-match filters for task listings.

use super::{Task, TaskCategory, TaskPriority, TaskStatus};

/// Optional exact-match predicates applied when listing tasks.
///
/// Absent fields impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    /// Restrict to tasks with this status.
    pub status: Option<TaskStatus>,
    /// Restrict to tasks with this category.
    pub category: Option<TaskCategory>,
    /// Restrict to tasks with this priority.
    pub priority: Option<TaskPriority>,
    /// Restrict to tasks assigned to exactly this person.
    pub assigned_to: Option<String>,
}

impl TaskFilter {
    /// Creates a filter that matches every task.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the filter to a status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Restricts the filter to a category.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Restricts the filter to a priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Restricts the filter to an assignee.
    #[must_use]
    pub fn with_assigned_to(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = Some(assigned_to.into());
        self
    }

    /// Returns `true` when the task satisfies every present predicate.
    #[must_use]
    pub fn matches(&self, task: &Task) -> bool {
        self.status.is_none_or(|status| task.status() == status)
            && self.category.is_none_or(|category| task.category() == category)
            && self.priority.is_none_or(|priority| task.priority() == priority)
            && self
                .assigned_to
                .as_deref()
                .is_none_or(|assignee| task.assigned_to() == Some(assignee))
    }
}

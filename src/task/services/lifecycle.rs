//! Service layer for classified task creation, update, and retrieval.

use crate::classification::classify;
use crate::task::{
    domain::{
        NewTaskData, Task, TaskCategory, TaskFilter, TaskHistoryEntry, TaskId, TaskPatch,
        TaskPriority, TaskStats, TaskStatus,
    },
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Request payload for creating a task.
///
/// Category and priority are deliberately absent: they are always derived
/// by classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    status: Option<TaskStatus>,
    assigned_to: Option<String>,
    due_date: Option<DateTime<Utc>>,
}

impl CreateTaskRequest {
    /// Creates a request with the required title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: None,
            assigned_to: None,
            due_date: None,
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assigned_to(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = Some(assigned_to.into());
        self
    }

    /// Sets the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }
}

/// Caller-requested changes to an existing task.
///
/// Only the fields listed here can be changed. Setting `manual_override`
/// suppresses re-classification when the title or description changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    title: Option<String>,
    description: Option<Option<String>>,
    status: Option<TaskStatus>,
    assigned_to: Option<Option<String>>,
    due_date: Option<Option<DateTime<Utc>>>,
    category: Option<TaskCategory>,
    priority: Option<TaskPriority>,
    manual_override: bool,
}

impl TaskChanges {
    /// Creates an empty change set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(Some(description.into()));
        self
    }

    /// Clears the description.
    #[must_use]
    pub fn without_description(mut self) -> Self {
        self.description = Some(None);
        self
    }

    /// Replaces the status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Replaces the assignee.
    #[must_use]
    pub fn with_assigned_to(mut self, assigned_to: impl Into<String>) -> Self {
        self.assigned_to = Some(Some(assigned_to.into()));
        self
    }

    /// Clears the assignee.
    #[must_use]
    pub fn without_assigned_to(mut self) -> Self {
        self.assigned_to = Some(None);
        self
    }

    /// Replaces the due date.
    #[must_use]
    pub const fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(Some(due_date));
        self
    }

    /// Clears the due date.
    #[must_use]
    pub const fn without_due_date(mut self) -> Self {
        self.due_date = Some(None);
        self
    }

    /// Pins the category, overriding classification.
    #[must_use]
    pub const fn with_category(mut self, category: TaskCategory) -> Self {
        self.category = Some(category);
        self
    }

    /// Pins the priority, overriding classification.
    #[must_use]
    pub const fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Sets whether re-classification is suppressed.
    #[must_use]
    pub const fn with_manual_override(mut self, manual_override: bool) -> Self {
        self.manual_override = manual_override;
        self
    }

    /// Returns `true` when applying these changes re-runs classification.
    #[must_use]
    pub const fn requires_reclassification(&self) -> bool {
        (self.title.is_some() || self.description.is_some()) && !self.manual_override
    }

    fn into_patch(self) -> TaskPatch {
        TaskPatch {
            title: self.title,
            description: self.description,
            status: self.status,
            assigned_to: self.assigned_to,
            due_date: self.due_date,
            category: self.category,
            priority: self.priority,
            classification: None,
        }
    }
}

/// A task together with its change history, most recent change first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskWithHistory {
    /// The task record.
    #[serde(flatten)]
    pub task: Task,
    /// Change history, most recent first.
    pub history: Vec<TaskHistoryEntry>,
}

/// Store operation named in lifecycle failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOperation {
    /// Inserting a new task.
    Create,
    /// Listing tasks.
    List,
    /// Fetching one task and its history.
    Fetch,
    /// Updating a task.
    Update,
    /// Deleting a task.
    Delete,
    /// Aggregating statistics.
    Stats,
}

impl fmt::Display for TaskOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Create => "create task",
            Self::List => "fetch tasks",
            Self::Fetch => "fetch task",
            Self::Update => "update task",
            Self::Delete => "delete task",
            Self::Stats => "fetch task stats",
        })
    }
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// No task matches the identifier.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The task store failed.
    #[error("failed to {operation}: {source}")]
    Store {
        /// Operation that was running.
        operation: TaskOperation,
        /// Underlying repository failure.
        #[source]
        source: TaskRepositoryError,
    },
}

impl TaskLifecycleError {
    /// Wraps a repository error, keeping not-found as its own kind.
    #[must_use]
    pub fn from_repository(operation: TaskOperation, err: TaskRepositoryError) -> Self {
        match err {
            TaskRepositoryError::NotFound(id) => Self::NotFound(id),
            source => Self::Store { operation, source },
        }
    }

    /// Returns `true` for [`TaskLifecycleError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
pub struct TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> Clone for TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<R, C> TaskLifecycleService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Returns the clock used to stamp task changes.
    #[must_use]
    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Classifies and stores a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the repository rejects the
    /// insert.
    pub async fn create(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        let classification = classify(&request.title, request.description.as_deref());
        let data = NewTaskData {
            title: request.title,
            description: request.description,
            status: request.status,
            assigned_to: request.assigned_to,
            due_date: request.due_date,
        };
        let task = Task::new(data, classification, &*self.clock);

        let stored = self
            .repository
            .insert(&task)
            .await
            .map_err(|err| TaskLifecycleError::from_repository(TaskOperation::Create, err))?;
        info!(
            task_id = %stored.id(),
            category = %stored.category(),
            priority = %stored.priority(),
            "task created"
        );
        Ok(stored)
    }

    /// Lists tasks matching `filter`, most recently created first.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the repository query fails.
    pub async fn list(&self, filter: &TaskFilter) -> TaskLifecycleResult<Vec<Task>> {
        self.repository
            .list(filter)
            .await
            .map_err(|err| TaskLifecycleError::from_repository(TaskOperation::List, err))
    }

    /// Fetches a task with its change history.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Store`] when a repository lookup fails.
    pub async fn get_by_id(&self, id: TaskId) -> TaskLifecycleResult<TaskWithHistory> {
        let task = self
            .repository
            .find_by_id(id)
            .await
            .map_err(|err| TaskLifecycleError::from_repository(TaskOperation::Fetch, err))?
            .ok_or(TaskLifecycleError::NotFound(id))?;
        let history = self
            .repository
            .history(id)
            .await
            .map_err(|err| TaskLifecycleError::from_repository(TaskOperation::Fetch, err))?;
        Ok(TaskWithHistory { task, history })
    }

    /// Applies caller changes to a task, re-classifying when its text changed.
    ///
    /// Re-classification runs when the title or description is among the
    /// changes and no manual override was requested. The classifier's
    /// category and priority apply only where the caller did not pin them;
    /// extracted entities and suggested actions are always refreshed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Store`] when the repository fails.
    pub async fn update(&self, id: TaskId, changes: TaskChanges) -> TaskLifecycleResult<Task> {
        let reclassify = changes.requires_reclassification();
        let mut patch = changes.into_patch();

        if reclassify {
            let current = self
                .repository
                .find_by_id(id)
                .await
                .map_err(|err| TaskLifecycleError::from_repository(TaskOperation::Update, err))?
                .ok_or(TaskLifecycleError::NotFound(id))?;
            let title = patch.title.as_deref().unwrap_or(current.title());
            let description = match &patch.description {
                Some(description) => description.as_deref(),
                None => current.description(),
            };
            let classification = classify(title, description);
            debug!(
                task_id = %id,
                category = %classification.category,
                priority = %classification.priority,
                "task re-classified"
            );
            patch.merge_classification(classification);
        }

        let updated = self
            .repository
            .update(id, &patch, self.clock.utc())
            .await
            .map_err(|err| TaskLifecycleError::from_repository(TaskOperation::Update, err))?;
        info!(task_id = %id, reclassified = reclassify, "task updated");
        Ok(updated)
    }

    /// Deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::NotFound`] when the task does not exist
    /// or [`TaskLifecycleError::Store`] when the repository fails.
    pub async fn delete(&self, id: TaskId) -> TaskLifecycleResult<()> {
        self.repository
            .delete(id)
            .await
            .map_err(|err| TaskLifecycleError::from_repository(TaskOperation::Delete, err))?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Counts tasks by status, category, and priority.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Store`] when the repository query fails.
    pub async fn stats(&self) -> TaskLifecycleResult<TaskStats> {
        let rows = self
            .repository
            .summaries()
            .await
            .map_err(|err| TaskLifecycleError::from_repository(TaskOperation::Stats, err))?;
        Ok(TaskStats::from_rows(&rows))
    }
}

//! In-memory repository for task lifecycle tests and local runs.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::task::{
    domain::{Task, TaskFilter, TaskHistoryEntry, TaskId, TaskPatch, TaskSummaryRow},
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory task repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: HashMap<TaskId, Task>,
    history: HashMap<TaskId, Vec<TaskHistoryEntry>>,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(err: &PoisonError<T>) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

/// Sorts tasks so the most recently created comes first.
fn newest_first(tasks: &mut [Task]) {
    tasks.sort_by(|left, right| right.created_at().cmp(&left.created_at()));
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        if state.tasks.contains_key(&task.id()) {
            return Err(TaskRepositoryError::DuplicateTask(task.id()));
        }
        state.tasks.insert(task.id(), task.clone());
        Ok(task.clone())
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| filter.matches(task))
            .cloned()
            .collect();
        newest_first(&mut tasks);
        Ok(tasks)
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        changed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let mut guard = self.state.write().map_err(|err| poisoned(&err))?;
        let state = &mut *guard;
        let task = state
            .tasks
            .get_mut(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;

        let changes = task.apply(patch, changed_at);
        let updated = task.clone();
        state.history.entry(id).or_default().extend(
            changes
                .into_iter()
                .map(|change| change.into_entry(id, changed_at)),
        );
        Ok(updated)
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(|err| poisoned(&err))?;
        state
            .tasks
            .remove(&id)
            .ok_or(TaskRepositoryError::NotFound(id))?;
        state.history.remove(&id);
        Ok(())
    }

    async fn history(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        // Reverse first so entries sharing a timestamp keep newest-first order
        // through the stable sort.
        let mut entries: Vec<TaskHistoryEntry> = state
            .history
            .get(&id)
            .map(|entries| entries.iter().rev().cloned().collect())
            .unwrap_or_default();
        entries.sort_by(|left, right| right.changed_at.cmp(&left.changed_at));
        Ok(entries)
    }

    async fn summaries(&self) -> TaskRepositoryResult<Vec<TaskSummaryRow>> {
        let state = self.state.read().map_err(|err| poisoned(&err))?;
        Ok(state
            .tasks
            .values()
            .map(|task| TaskSummaryRow {
                status: Some(task.status().as_str().to_owned()),
                category: Some(task.category().as_str().to_owned()),
                priority: Some(task.priority().as_str().to_owned()),
            })
            .collect())
    }
}

//! `PostgreSQL` repository implementation for task storage.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskHistoryRow, TaskRow},
    schema::{task_history, tasks},
};
use crate::task::{
    domain::{
        PersistedTaskData, Task, TaskCategory, TaskFilter, TaskHistoryEntry, TaskHistoryId,
        TaskId, TaskPatch, TaskPriority, TaskStatus, TaskSummaryRow,
    },
    ports::{TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// `PostgreSQL`-backed task repository.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

impl From<DieselError> for TaskRepositoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, task: &Task) -> TaskRepositoryResult<Task> {
        let task_id = task.id();
        let new_row = to_new_row(task)?;

        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(|err| match err {
                    DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                        TaskRepositoryError::DuplicateTask(task_id)
                    }
                    _ => TaskRepositoryError::persistence(err),
                })?;
            row_to_task(row)
        })
        .await
    }

    async fn list(&self, filter: &TaskFilter) -> TaskRepositoryResult<Vec<Task>> {
        let lookup = filter.clone();
        self.run_blocking(move |connection| {
            let mut query = tasks::table.select(TaskRow::as_select()).into_boxed();
            if let Some(status) = lookup.status {
                query = query.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(category) = lookup.category {
                query = query.filter(tasks::category.eq(category.as_str()));
            }
            if let Some(priority) = lookup.priority {
                query = query.filter(tasks::priority.eq(priority.as_str()));
            }
            if let Some(assignee) = lookup.assigned_to {
                query = query.filter(tasks::assigned_to.eq(assignee));
            }

            let rows = query
                .order(tasks::created_at.desc())
                .load::<TaskRow>(connection)?;
            rows.into_iter().map(row_to_task).collect()
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = find_row(connection, id)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        changed_at: DateTime<Utc>,
    ) -> TaskRepositoryResult<Task> {
        let pending = patch.clone();
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                let row = tasks::table
                    .find(id.into_inner())
                    .select(TaskRow::as_select())
                    .for_update()
                    .first::<TaskRow>(tx_conn)
                    .optional()?
                    .ok_or(TaskRepositoryError::NotFound(id))?;

                let mut task = row_to_task(row)?;
                let changes = task.apply(&pending, changed_at);

                diesel::update(tasks::table.find(id.into_inner()))
                    .set(&to_changeset(&task)?)
                    .execute(tx_conn)?;

                let history_rows: Vec<TaskHistoryRow> = changes
                    .into_iter()
                    .map(|change| to_history_row(change.into_entry(id, changed_at)))
                    .collect();
                if !history_rows.is_empty() {
                    diesel::insert_into(task_history::table)
                        .values(&history_rows)
                        .execute(tx_conn)?;
                }

                Ok(task)
            })
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()> {
        self.run_blocking(move |connection| {
            connection.transaction::<_, TaskRepositoryError, _>(|tx_conn| {
                diesel::delete(
                    task_history::table.filter(task_history::task_id.eq(id.into_inner())),
                )
                .execute(tx_conn)?;
                let deleted =
                    diesel::delete(tasks::table.find(id.into_inner())).execute(tx_conn)?;
                if deleted == 0 {
                    return Err(TaskRepositoryError::NotFound(id));
                }
                Ok(())
            })
        })
        .await
    }

    async fn history(&self, id: TaskId) -> TaskRepositoryResult<Vec<TaskHistoryEntry>> {
        self.run_blocking(move |connection| {
            let rows = task_history::table
                .filter(task_history::task_id.eq(id.into_inner()))
                .order((
                    task_history::changed_at.desc(),
                    task_history::sequence.desc(),
                ))
                .select(TaskHistoryRow::as_select())
                .load::<TaskHistoryRow>(connection)?;
            Ok(rows.into_iter().map(row_to_history_entry).collect())
        })
        .await
    }

    async fn summaries(&self) -> TaskRepositoryResult<Vec<TaskSummaryRow>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .select((tasks::status, tasks::category, tasks::priority))
                .load::<(String, String, String)>(connection)?;
            Ok(rows
                .into_iter()
                .map(|(status, category, priority)| TaskSummaryRow {
                    status: Some(status),
                    category: Some(category),
                    priority: Some(priority),
                })
                .collect())
        })
        .await
    }
}

fn find_row(connection: &mut PgConnection, id: TaskId) -> TaskRepositoryResult<Option<TaskRow>> {
    let row = tasks::table
        .find(id.into_inner())
        .select(TaskRow::as_select())
        .first::<TaskRow>(connection)
        .optional()?;
    Ok(row)
}

fn to_new_row(task: &Task) -> TaskRepositoryResult<NewTaskRow> {
    let extracted_entities = serde_json::to_value(task.extracted_entities())
        .map_err(TaskRepositoryError::persistence)?;
    let suggested_actions = serde_json::to_value(task.suggested_actions())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(NewTaskRow {
        id: task.id().into_inner(),
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        category: task.category().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assigned_to: task.assigned_to().map(str::to_owned),
        due_date: task.due_date(),
        extracted_entities,
        suggested_actions,
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    })
}

fn to_changeset(task: &Task) -> TaskRepositoryResult<TaskChangeset> {
    let extracted_entities = serde_json::to_value(task.extracted_entities())
        .map_err(TaskRepositoryError::persistence)?;
    let suggested_actions = serde_json::to_value(task.suggested_actions())
        .map_err(TaskRepositoryError::persistence)?;

    Ok(TaskChangeset {
        title: task.title().to_owned(),
        description: task.description().map(str::to_owned),
        category: task.category().as_str().to_owned(),
        priority: task.priority().as_str().to_owned(),
        status: task.status().as_str().to_owned(),
        assigned_to: task.assigned_to().map(str::to_owned),
        due_date: task.due_date(),
        extracted_entities,
        suggested_actions,
        updated_at: task.updated_at(),
    })
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let TaskRow {
        id,
        title,
        description,
        category,
        priority,
        status,
        assigned_to,
        due_date,
        extracted_entities,
        suggested_actions,
        created_at,
        updated_at,
    } = row;

    let data = PersistedTaskData {
        id: TaskId::from_uuid(id),
        title,
        description,
        category: TaskCategory::try_from(category.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        priority: TaskPriority::try_from(priority.as_str())
            .map_err(TaskRepositoryError::persistence)?,
        status: TaskStatus::try_from(status.as_str()).map_err(TaskRepositoryError::persistence)?,
        assigned_to,
        due_date,
        extracted_entities: serde_json::from_value(extracted_entities)
            .map_err(TaskRepositoryError::persistence)?,
        suggested_actions: serde_json::from_value(suggested_actions)
            .map_err(TaskRepositoryError::persistence)?,
        created_at,
        updated_at,
    };
    Ok(Task::from_persisted(data))
}

fn to_history_row(entry: TaskHistoryEntry) -> TaskHistoryRow {
    TaskHistoryRow {
        id: entry.id.into_inner(),
        task_id: entry.task_id.into_inner(),
        field_name: entry.field_name,
        old_value: entry.old_value,
        new_value: entry.new_value,
        changed_at: entry.changed_at,
    }
}

fn row_to_history_entry(row: TaskHistoryRow) -> TaskHistoryEntry {
    TaskHistoryEntry {
        id: TaskHistoryId::from_uuid(row.id),
        task_id: TaskId::from_uuid(row.task_id),
        field_name: row.field_name,
        old_value: row.old_value,
        new_value: row.new_value,
        changed_at: row.changed_at,
    }
}

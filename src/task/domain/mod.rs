//! Domain model for task lifecycle management.
//!
//! The task domain models task records, the partial updates applied to them,
//! their change history, and the aggregate statistics derived from them,
//! while keeping all infrastructure concerns outside of the domain boundary.

mod error;
mod fields;
mod filter;
mod history;
mod ids;
mod patch;
mod stats;
mod task;

pub use error::ParseTaskFieldError;
pub use fields::{TaskCategory, TaskPriority, TaskStatus};
pub use filter::TaskFilter;
pub use history::{TaskFieldChange, TaskHistoryEntry, TaskHistoryId};
pub use ids::TaskId;
pub use patch::{ClassificationSnapshot, TaskPatch};
pub use stats::{TaskStats, TaskSummaryRow};
pub use task::{NewTaskData, PersistedTaskData, Task};

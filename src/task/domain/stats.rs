//! Aggregate task statistics.

use super::{TaskCategory, TaskPriority, TaskStatus};
use serde::Serialize;
use std::collections::BTreeMap;

/// Raw status, category, and priority values of one stored task.
///
/// Values are kept as stored strings so that unexpected values can be
/// skipped rather than failing the whole aggregation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskSummaryRow {
    /// Stored status value.
    pub status: Option<String>,
    /// Stored category value.
    pub category: Option<String>,
    /// Stored priority value.
    pub priority: Option<String>,
}

/// Task counts broken down by status, category, and priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskStats {
    /// Count per status, seeded with every status at zero.
    pub by_status: BTreeMap<TaskStatus, usize>,
    /// Count per category, seeded with every category at zero.
    pub by_category: BTreeMap<TaskCategory, usize>,
    /// Count per priority, seeded with every priority at zero.
    pub by_priority: BTreeMap<TaskPriority, usize>,
    /// Number of tasks aggregated.
    pub total: usize,
}

impl TaskStats {
    /// Aggregates summary rows.
    ///
    /// A value outside the known enumeration is not counted in its
    /// breakdown; the row still counts toward `total`.
    #[must_use]
    pub fn from_rows(rows: &[TaskSummaryRow]) -> Self {
        let mut stats = Self {
            by_status: seeded(&TaskStatus::ALL),
            by_category: seeded(&TaskCategory::ALL),
            by_priority: seeded(&TaskPriority::ALL),
            total: rows.len(),
        };

        for row in rows {
            tally(&mut stats.by_status, row.status.as_deref());
            tally(&mut stats.by_category, row.category.as_deref());
            tally(&mut stats.by_priority, row.priority.as_deref());
        }

        stats
    }
}

fn seeded<T: Ord + Copy>(values: &[T]) -> BTreeMap<T, usize> {
    values.iter().map(|value| (*value, 0)).collect()
}

fn tally<T>(counts: &mut BTreeMap<T, usize>, raw: Option<&str>)
where
    T: Ord + for<'a> TryFrom<&'a str>,
{
    let Some(value) = raw.and_then(|stored| T::try_from(stored).ok()) else {
        return;
    };
    if let Some(count) = counts.get_mut(&value) {
        *count += 1;
    }
}

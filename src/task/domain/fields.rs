//! Closed enumerations for task status, category, and priority.

use super::ParseTaskFieldError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Task progress status.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task has been recorded but work has not started.
    #[default]
    Pending,
    /// Task is being worked on.
    InProgress,
    /// Task has been completed.
    Completed,
}

impl TaskStatus {
    /// Every status, in declaration order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::InProgress, Self::Completed];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for TaskStatus {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "pending" => Ok(Self::Pending),
            "in_progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseTaskFieldError::new("status", value)),
        }
    }
}

/// Task category assigned by keyword classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskCategory {
    /// Meetings, calls, appointments, and calendar work.
    Scheduling,
    /// Payments, invoices, budgets, and expenses.
    Finance,
    /// Bugs, installs, repairs, and deployments.
    Technical,
    /// Hazards, inspections, and compliance.
    Safety,
    /// Anything without a stronger keyword signal.
    General,
}

impl TaskCategory {
    /// Every category, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Scheduling,
        Self::Finance,
        Self::Technical,
        Self::Safety,
        Self::General,
    ];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scheduling => "scheduling",
            Self::Finance => "finance",
            Self::Technical => "technical",
            Self::Safety => "safety",
            Self::General => "general",
        }
    }
}

impl TryFrom<&str> for TaskCategory {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "scheduling" => Ok(Self::Scheduling),
            "finance" => Ok(Self::Finance),
            "technical" => Ok(Self::Technical),
            "safety" => Ok(Self::Safety),
            "general" => Ok(Self::General),
            _ => Err(ParseTaskFieldError::new("category", value)),
        }
    }
}

/// Task urgency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    /// Needs attention right away.
    High,
    /// Needs attention soon.
    Medium,
    /// No urgency signal.
    Low,
}

impl TaskPriority {
    /// Every priority, in declaration order.
    pub const ALL: [Self; 3] = [Self::High, Self::Medium, Self::Low];

    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl TryFrom<&str> for TaskPriority {
    type Error = ParseTaskFieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            _ => Err(ParseTaskFieldError::new("priority", value)),
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )+
    };
}

display_as_str!(TaskStatus, TaskCategory, TaskPriority);

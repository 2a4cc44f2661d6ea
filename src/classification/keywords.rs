//! Static keyword and action tables used by the classifier.

use crate::task::domain::TaskCategory;

/// Category keyword lists in scoring order.
///
/// The order matters: when two categories tie on score, the one listed
/// first wins.
pub const CATEGORY_KEYWORDS: [(TaskCategory, &[&str]); 4] = [
    (
        TaskCategory::Scheduling,
        &[
            "meeting",
            "schedule",
            "call",
            "appointment",
            "deadline",
            "calendar",
            "event",
            "conference",
        ],
    ),
    (
        TaskCategory::Finance,
        &[
            "payment",
            "invoice",
            "bill",
            "budget",
            "cost",
            "expense",
            "financial",
            "revenue",
            "profit",
        ],
    ),
    (
        TaskCategory::Technical,
        &[
            "bug", "fix", "error", "install", "repair", "maintain", "code", "system", "server",
            "deploy",
        ],
    ),
    (
        TaskCategory::Safety,
        &[
            "safety",
            "hazard",
            "inspection",
            "compliance",
            "ppe",
            "accident",
            "risk",
            "emergency",
        ],
    ),
];

/// Words that mark a task as high priority.
pub const HIGH_PRIORITY_KEYWORDS: &[&str] = &[
    "urgent",
    "asap",
    "immediately",
    "today",
    "critical",
    "emergency",
    "now",
    "crucial",
];

/// Words that mark a task as medium priority when no high-priority word is
/// present.
pub const MEDIUM_PRIORITY_KEYWORDS: &[&str] =
    &["soon", "this week", "important", "needed", "upcoming"];

/// Returns the fixed list of suggested actions for a category.
#[must_use]
pub const fn suggested_actions(category: TaskCategory) -> &'static [&'static str] {
    match category {
        TaskCategory::Scheduling => &[
            "Block calendar",
            "Send invite",
            "Prepare agenda",
            "Set reminder",
        ],
        TaskCategory::Finance => &[
            "Check budget",
            "Get approval",
            "Generate invoice",
            "Update records",
        ],
        TaskCategory::Technical => &[
            "Diagnose issue",
            "Check resources",
            "Assign technician",
            "Document fix",
        ],
        TaskCategory::Safety => &[
            "Conduct inspection",
            "File report",
            "Notify supervisor",
            "Update checklist",
        ],
        TaskCategory::General => &["Review task", "Assign owner", "Set deadline", "Add notes"],
    }
}

/// Iterates every category keyword in declaration order.
pub(crate) fn all_category_keywords() -> impl Iterator<Item = &'static str> {
    CATEGORY_KEYWORDS
        .iter()
        .flat_map(|(_, keywords)| keywords.iter().copied())
}

/// Iterates every priority keyword, high list first.
pub(crate) fn all_priority_keywords() -> impl Iterator<Item = &'static str> {
    HIGH_PRIORITY_KEYWORDS
        .iter()
        .chain(MEDIUM_PRIORITY_KEYWORDS)
        .copied()
}

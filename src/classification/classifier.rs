//! Category scoring, priority detection, and the combined classifier.

use super::{
    entities::{ExtractedEntities, extract_entities},
    keywords::{
        CATEGORY_KEYWORDS, HIGH_PRIORITY_KEYWORDS, MEDIUM_PRIORITY_KEYWORDS, suggested_actions,
    },
};
use crate::task::domain::{TaskCategory, TaskPriority};
use serde::{Deserialize, Serialize};

/// Output of a single classification run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Detected category.
    pub category: TaskCategory,
    /// Detected priority.
    pub priority: TaskPriority,
    /// Entities pulled out of the text.
    pub extracted_entities: ExtractedEntities,
    /// Actions suggested for the detected category.
    pub suggested_actions: Vec<String>,
}

/// Classifies a task from its title and optional description.
///
/// Never fails: text without any keyword signal classifies as
/// [`TaskCategory::General`] with [`TaskPriority::Low`].
#[must_use]
pub fn classify(title: &str, description: Option<&str>) -> ClassificationResult {
    let original_text = format!("{title} {}", description.unwrap_or_default());
    let text = scan_text(title, description);

    let category = detect_category(&text);
    let priority = detect_priority(&text);
    let extracted_entities = extract_entities(&original_text, &text);
    let suggested_actions = suggested_actions(category)
        .iter()
        .map(|action| (*action).to_owned())
        .collect();

    ClassificationResult {
        category,
        priority,
        extracted_entities,
        suggested_actions,
    }
}

/// Builds the lowercased text that keyword matching runs against.
#[must_use]
pub fn scan_text(title: &str, description: Option<&str>) -> String {
    format!("{title} {}", description.unwrap_or_default()).to_lowercase()
}

/// Picks the category whose keywords occur most often in `scan_text`.
///
/// Each keyword counts once however often it repeats. Only a strictly
/// higher score replaces the running best, so the earliest-declared category
/// wins a tie; a best score of zero yields [`TaskCategory::General`].
#[must_use]
pub fn detect_category(scan_text: &str) -> TaskCategory {
    let mut best = TaskCategory::General;
    let mut best_score = 0;

    for (category, keywords) in &CATEGORY_KEYWORDS {
        let score = keywords
            .iter()
            .filter(|keyword| scan_text.contains(*keyword))
            .count();
        if score > best_score {
            best = *category;
            best_score = score;
        }
    }

    best
}

/// Detects priority by the first matching urgency word.
///
/// The whole high-priority list is checked before the medium list.
#[must_use]
pub fn detect_priority(scan_text: &str) -> TaskPriority {
    let contains_any =
        |keywords: &[&str]| keywords.iter().any(|keyword| scan_text.contains(keyword));

    if contains_any(HIGH_PRIORITY_KEYWORDS) {
        TaskPriority::High
    } else if contains_any(MEDIUM_PRIORITY_KEYWORDS) {
        TaskPriority::Medium
    } else {
        TaskPriority::Low
    }
}

//! Keyword-driven task classification.
//!
//! Classification is a pure function of a task's title and description. It
//! scores the text against fixed keyword tables to pick a category, scans
//! for urgency words to pick a priority, pulls people, keywords, urgency
//! words, and time expressions out of the text, and looks up the suggested
//! actions for the chosen category.
//!
//! Matching is plain substring containment on the lowercased text, with no
//! word-boundary checks: `"schedule"` matches inside `"scheduled"`.
//!
//! ```
//! use tasksense::classification::classify;
//! use tasksense::task::domain::{TaskCategory, TaskPriority};
//!
//! let result = classify("Urgent meeting with Alice", Some("call before 3:30pm"));
//! assert_eq!(result.category, TaskCategory::Scheduling);
//! assert_eq!(result.priority, TaskPriority::High);
//! assert_eq!(result.extracted_entities.people, vec!["Alice".to_owned()]);
//! ```

mod classifier;
mod entities;
mod keywords;

pub use classifier::{ClassificationResult, classify, detect_category, detect_priority, scan_text};
pub use entities::{ExtractedEntities, extract_entities};
pub use keywords::{
    CATEGORY_KEYWORDS, HIGH_PRIORITY_KEYWORDS, MEDIUM_PRIORITY_KEYWORDS, suggested_actions,
};

#[cfg(test)]
mod tests;

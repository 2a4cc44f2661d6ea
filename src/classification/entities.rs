//! Extraction of people, keywords, urgency words, and time expressions.

use super::keywords::{all_category_keywords, all_priority_keywords};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

/// Structured artefacts pulled out of a task's text during classification.
///
/// Every list holds distinct values in order of first occurrence.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    /// Names following trigger words such as `with` or `notify`, plus group
    /// words such as `team`.
    pub people: Vec<String>,
    /// Category keywords found in the text.
    pub keywords: Vec<String>,
    /// Priority keywords found in the text.
    pub urgency_indicators: Vec<String>,
    /// Lowercased relative dates, clock times, and calendar dates.
    pub time_indicators: Vec<String>,
}

/// A people pattern and the capture group holding the name.
struct PeoplePattern {
    regex: Regex,
    group: usize,
}

#[expect(
    clippy::expect_used,
    reason = "patterns are string literals exercised by the unit tests"
)]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in entity pattern must compile")
}

static PEOPLE_PATTERNS: LazyLock<[PeoplePattern; 2]> = LazyLock::new(|| {
    [
        PeoplePattern {
            regex: compile(
                r"(?:with|by|assign to|contact|notify|tell)\s+([A-Z][a-z]+(?:\s+[A-Z][a-z]+)*)",
            ),
            group: 1,
        },
        PeoplePattern {
            regex: compile(r"(?i)team|group|department"),
            group: 0,
        },
    ]
});

static TIME_PATTERNS: LazyLock<[Regex; 8]> = LazyLock::new(|| {
    [
        compile(r"(?i)today"),
        compile(r"(?i)tomorrow"),
        compile(r"(?i)this week"),
        compile(r"(?i)next week"),
        compile(r"(?i)this month"),
        compile(r"(?i)next month"),
        compile(r"(?i)[0-9]{1,2}:[0-9]{2}\s*(?:am|pm)?"),
        compile(r"[0-9]{1,2}/[0-9]{1,2}/[0-9]{2,4}"),
    ]
});

/// Extracts entities from a task.
///
/// `original_text` is the title and description joined by a space with
/// their original casing; people and time expressions are matched against
/// it. `scan_text` is the lowercased form used for keyword matching.
#[must_use]
pub fn extract_entities(original_text: &str, scan_text: &str) -> ExtractedEntities {
    let mut entities = ExtractedEntities::default();

    for pattern in PEOPLE_PATTERNS.iter() {
        for captures in pattern.regex.captures_iter(original_text) {
            if let Some(found) = captures.get(pattern.group) {
                push_unique(&mut entities.people, found.as_str().trim());
            }
        }
    }

    for keyword in all_category_keywords().filter(|keyword| scan_text.contains(keyword)) {
        push_unique(&mut entities.keywords, keyword);
    }

    for keyword in all_priority_keywords().filter(|keyword| scan_text.contains(keyword)) {
        push_unique(&mut entities.urgency_indicators, keyword);
    }

    for pattern in TIME_PATTERNS.iter() {
        for found in pattern.find_iter(original_text) {
            push_unique(&mut entities.time_indicators, &found.as_str().to_lowercase());
        }
    }

    entities
}

fn push_unique(values: &mut Vec<String>, candidate: &str) {
    if !values.iter().any(|existing| existing == candidate) {
        values.push(candidate.to_owned());
    }
}

//! Progress counter and status-marker updates.
//!
//! Topic counters and the status marker are only looked up inside the topic
//! section; the document-wide total is the first matching line anywhere.

use crate::markup::{
    STATUS_IN_PROGRESS, STATUS_IN_PROGRESS_MARKER, STATUS_NOT_STARTED_RE, TOPIC_COUNTER_RE,
    TOTAL_COUNTER_RE,
};
use crate::model::topic::catalog_entries;
use crate::mutator::section::Section;
use crate::mutator::{CounterPolicy, MutationResult};
use regex::{Captures, Regex};

/// Result of updating one counter line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CounterChange {
    /// Value before the update; `None` when no counter line exists.
    pub previous: Option<u64>,
    pub current: Option<u64>,
}

/// Updates the `Questions Solved` counter and status marker of a section
/// that already contains the new question.
///
/// `existing` is the number of question bullets before the insertion.
pub(crate) fn update_topic_counters(
    section_text: &str,
    policy: CounterPolicy,
    existing: usize,
) -> (String, CounterChange) {
    let recount = existing as u64 + 1;
    let (updated, change) = replace_counter(&TOPIC_COUNTER_RE, section_text, policy, recount);

    let was_empty = match policy {
        CounterPolicy::Increment => change.previous.unwrap_or(0) == 0,
        CounterPolicy::Recount => existing == 0,
    };
    if !was_empty {
        return (updated, change);
    }

    let flipped = STATUS_NOT_STARTED_RE
        .replacen(&updated, 1, |caps: &Captures<'_>| {
            let marker = if caps.get(2).is_some() {
                STATUS_IN_PROGRESS_MARKER
            } else {
                ""
            };
            format!("{}{marker}{STATUS_IN_PROGRESS}", &caps[1])
        })
        .into_owned();
    (flipped, change)
}

/// Updates the document-wide `Total Questions Solved` counter, if present.
pub(crate) fn update_total_counter(
    text: &str,
    policy: CounterPolicy,
) -> MutationResult<(String, CounterChange)> {
    let recount = match policy {
        CounterPolicy::Increment => 0,
        CounterPolicy::Recount => count_all_questions(text)? as u64,
    };
    Ok(replace_counter(&TOTAL_COUNTER_RE, text, policy, recount))
}

/// Counts question bullets across every catalog topic section.
pub(crate) fn count_all_questions(text: &str) -> MutationResult<usize> {
    let mut total = 0;
    for entry in catalog_entries() {
        if let Some(section) = Section::locate(text, entry)? {
            total += section.question_bullets().len();
        }
    }
    Ok(total)
}

fn replace_counter(
    pattern: &Regex,
    text: &str,
    policy: CounterPolicy,
    recount: u64,
) -> (String, CounterChange) {
    let Some(caps) = pattern.captures(text) else {
        return (
            text.to_string(),
            CounterChange {
                previous: None,
                current: None,
            },
        );
    };
    let previous = caps[2].parse::<u64>().ok();
    let current = match policy {
        CounterPolicy::Increment => previous.map(|value| value.saturating_add(1)),
        CounterPolicy::Recount => Some(recount),
    };
    let Some(value) = current else {
        return (text.to_string(), CounterChange { previous, current });
    };

    let updated = pattern
        .replacen(text, 1, |caps: &Captures<'_>| format!("{}{value}", &caps[1]))
        .into_owned();
    (updated, CounterChange { previous, current })
}

#[cfg(test)]
mod tests {
    use super::{update_topic_counters, update_total_counter};
    use crate::mutator::CounterPolicy;

    const SECTION: &str = "### 4. Trees\n- **Status:** 🔴 Not Started\n- **Questions Solved:** 0\n";

    #[test]
    fn increment_from_zero_flips_status() {
        let (updated, change) = update_topic_counters(SECTION, CounterPolicy::Increment, 0);
        assert_eq!(change.previous, Some(0));
        assert_eq!(change.current, Some(1));
        assert!(updated.contains("- **Questions Solved:** 1\n"));
        assert!(updated.contains("- **Status:** 🟡 In Progress\n"));
    }

    #[test]
    fn increment_keeps_status_when_already_started() {
        let section = SECTION.replace("Solved:** 0", "Solved:** 3");
        let (updated, _) = update_topic_counters(&section, CounterPolicy::Increment, 3);
        assert!(updated.contains("- **Questions Solved:** 4\n"));
        assert!(updated.contains("🔴 Not Started"));
    }

    #[test]
    fn recount_overwrites_drifted_counter() {
        let section = SECTION.replace("Solved:** 0", "Solved:** 9");
        let (updated, change) = update_topic_counters(&section, CounterPolicy::Recount, 0);
        assert_eq!(change.previous, Some(9));
        assert!(updated.contains("- **Questions Solved:** 1\n"));
        assert!(updated.contains("🟡 In Progress"));
    }

    #[test]
    fn plain_status_without_marker_flips_text_only() {
        let section = "### 4. Trees\n- **Status:** Not Started\n";
        let (updated, change) = update_topic_counters(section, CounterPolicy::Increment, 0);
        assert_eq!(change.previous, None);
        assert!(updated.contains("- **Status:** In Progress\n"));
    }

    #[test]
    fn total_counter_is_optional() {
        let (updated, change) =
            update_total_counter("no totals here\n", CounterPolicy::Increment).unwrap();
        assert_eq!(updated, "no totals here\n");
        assert_eq!(change.current, None);

        let text = "- **Total Questions Solved:** 41\n";
        let (updated, _) = update_total_counter(text, CounterPolicy::Increment).unwrap();
        assert_eq!(updated, "- **Total Questions Solved:** 42\n");
    }

    #[test]
    fn total_recount_counts_bullets_in_catalog_sections() {
        let text = "- **Total Questions Solved:** 7\n\n### 1. Arrays & Strings\n- [ ] Question 1: A\n- [x] Question 2: B\n---\n### 15. Tries\n- [ ] Question 1: C\n";
        let (updated, _) = update_total_counter(text, CounterPolicy::Recount).unwrap();
        assert!(updated.starts_with("- **Total Questions Solved:** 2\n"));
    }
}

//! `add_question`: append a numbered entry to a topic section.

use crate::model::intent::AddQuestionRequest;
use crate::model::topic::{topic_by_id, TopicEntry};
use crate::mutator::counters::{update_topic_counters, update_total_counter};
use crate::mutator::section::{insert_after_line, Section};
use crate::mutator::template::{render_solution_file, SolutionFile};
use crate::mutator::{CounterPolicy, MutationError, MutationResult, TopicLookup};
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Result of inserting a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionInsertion {
    /// Full updated document text.
    pub text: String,
    /// 1-based number assigned within the topic.
    pub question_number: usize,
    /// Companion file to create when none exists at its path yet.
    pub solution: SolutionFile,
}

/// Deterministic companion path: `<topic-folder>/<title-hyphenated>/solution.md`.
pub fn solution_path(entry: &TopicEntry, title: &str) -> String {
    let folder = WHITESPACE_RUN_RE.replace_all(title.trim(), "-");
    format!("{}/{folder}/solution.md", entry.folder)
}

/// Adds a question using [`CounterPolicy::Increment`].
pub fn add_question(text: &str, request: &AddQuestionRequest) -> MutationResult<QuestionInsertion> {
    add_question_with_policy(text, request, CounterPolicy::Increment)
}

/// Adds a question to the end of its topic section.
///
/// # Errors
/// - `InvalidIntent` when the request fails validation.
/// - `TopicNotFound` when the topic id is outside the catalog or its heading
///   is missing from `text`.
pub fn add_question_with_policy(
    text: &str,
    request: &AddQuestionRequest,
    policy: CounterPolicy,
) -> MutationResult<QuestionInsertion> {
    request.validate()?;
    let lookup = TopicLookup::Id(request.topic_id);
    let entry = topic_by_id(request.topic_id).ok_or(MutationError::TopicNotFound(lookup))?;
    let section = Section::locate(text, entry)?.ok_or(MutationError::TopicNotFound(lookup))?;

    let existing = section.question_bullets().len();
    let question_number = existing + 1;
    let path = solution_path(entry, request.trimmed_title());
    let entry_block = render_entry(request, question_number, &path);

    let anchor_line = section
        .last_content_line()
        .ok_or(MutationError::TopicNotFound(lookup))?;
    let mut block = String::with_capacity(entry_block.len() + 2);
    block.push('\n');
    block.push_str(&entry_block);
    if section.is_terminated() && !section.as_str().ends_with("\n\n") {
        block.push('\n');
    }
    let with_entry = insert_after_line(text, &anchor_line, &block);

    // Topic counters are only looked up inside the grown section.
    let section_end = section.end + (with_entry.len() - text.len());
    let (new_section, topic_change) =
        update_topic_counters(&with_entry[section.start..section_end], policy, existing);

    let mut spliced = String::with_capacity(with_entry.len() + 4);
    spliced.push_str(&with_entry[..section.start]);
    spliced.push_str(&new_section);
    spliced.push_str(&with_entry[section_end..]);

    let (updated, total_change) = update_total_counter(&spliced, policy)?;

    info!(
        "event=add_question module=mutator status=ok topic_id={} question_number={} topic_counter={:?} total_counter={:?}",
        entry.id, question_number, topic_change.current, total_change.current
    );

    Ok(QuestionInsertion {
        text: updated,
        question_number,
        solution: SolutionFile {
            path,
            content: render_solution_file(request),
        },
    })
}

/// Renders the bullet block for a new question, newline-terminated.
fn render_entry(request: &AddQuestionRequest, number: usize, solution_path: &str) -> String {
    let mut entry = format!("- [ ] Question {number}: {}\n", request.trimmed_title());
    entry.push_str(&format!(
        "  - **Difficulty:** {}\n",
        request.difficulty_or_default()
    ));
    entry.push_str(&format!(
        "  - **Solution:** [{solution_path}]({solution_path})\n"
    ));
    push_sub_list(&mut entry, "**Key Points:**", &request.key_point_lines());
    push_sub_list(&mut entry, "**Edge Cases:**", &request.edge_case_lines());
    entry
}

fn push_sub_list(entry: &mut String, label: &str, items: &[&str]) {
    if items.is_empty() {
        return;
    }
    entry.push_str(&format!("  - {label}\n"));
    for item in items {
        entry.push_str(&format!("    - {item}\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::{add_question, render_entry, solution_path};
    use crate::model::intent::AddQuestionRequest;
    use crate::model::question::Difficulty;
    use crate::model::topic::topic_by_id;
    use crate::mutator::MutationError;

    #[test]
    fn solution_path_hyphenates_whitespace_runs() {
        let trees = topic_by_id(4).unwrap();
        assert_eq!(
            solution_path(trees, " Lowest  Common\tAncestor "),
            "04-Trees/Lowest-Common-Ancestor/solution.md"
        );
    }

    #[test]
    fn entry_renders_optional_lists_in_input_order() {
        let mut request = AddQuestionRequest::new(1, "Two Sum");
        request.difficulty = Some(Difficulty::Medium);
        request.key_points = Some("first\n\nsecond".to_string());
        let entry = render_entry(&request, 3, "01-Arrays-Strings/Two-Sum/solution.md");
        assert_eq!(
            entry,
            "- [ ] Question 3: Two Sum\n  - **Difficulty:** Medium\n  - **Solution:** [01-Arrays-Strings/Two-Sum/solution.md](01-Arrays-Strings/Two-Sum/solution.md)\n  - **Key Points:**\n    - first\n    - second\n"
        );
    }

    #[test]
    fn unknown_topic_id_is_topic_not_found() {
        let err = add_question("### 1. Arrays & Strings\n", &AddQuestionRequest::new(15, "X"))
            .unwrap_err();
        assert!(matches!(err, MutationError::TopicNotFound(_)));
    }

    #[test]
    fn missing_heading_is_topic_not_found() {
        let err = add_question("# Tracker\n", &AddQuestionRequest::new(2, "X")).unwrap_err();
        assert!(matches!(err, MutationError::TopicNotFound(_)));
    }

    #[test]
    fn insertion_goes_after_existing_entries_before_rule() {
        let text = "### 1. Arrays & Strings\n- **Questions Solved:** 1\n\n- [x] Question 1: Two Sum\n  - **Difficulty:** Easy\n\n---\n### 2. Linked Lists\n";
        let inserted = add_question(text, &AddQuestionRequest::new(1, "3Sum")).unwrap();
        assert_eq!(inserted.question_number, 2);
        assert_eq!(
            inserted.text,
            "### 1. Arrays & Strings\n- **Questions Solved:** 2\n\n- [x] Question 1: Two Sum\n  - **Difficulty:** Easy\n\n- [ ] Question 2: 3Sum\n  - **Difficulty:** Easy\n  - **Solution:** [01-Arrays-Strings/3Sum/solution.md](01-Arrays-Strings/3Sum/solution.md)\n\n---\n### 2. Linked Lists\n"
        );
    }
}

//! Tracker markdown dialect: shared line patterns and anchor builders.
//!
//! # Responsibility
//! - Hold the fixed patterns both the parser and the mutator recognize.
//! - Build locating patterns from dynamic text (topic names, question titles).
//!
//! # Invariants
//! - Dynamic text is passed through [`literal_pattern`] before it is
//!   interpolated into any pattern.
//! - A line is a label only when it opens with the label
//!   ([`label_value`]); labels mentioned inside item text do not count.
//! - Edits are scoped to sections ending at [`is_section_boundary`]; the
//!   parser only changes topic on catalog headings.

use crate::model::question::ListKey;
use crate::model::topic::TopicEntry;
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) static TOPIC_HEADING_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^###\s+\d+\.\s+(.+?)\s*$").expect("valid topic heading regex")
});
static SECTION_HEADING_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{1,3}\s").expect("valid section heading regex"));
static QUESTIONS_HEADER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^#{1,6}\s*questions?:\s*$").expect("valid questions header regex")
});
pub(crate) static QUESTION_BULLET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*- \[([ xX])\]\s*Question\s+\d+:\s*(.+?)\s*$")
        .expect("valid question bullet regex")
});
pub(crate) static SUB_BULLET_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?: {2,}|\t+)- (.+)$").expect("valid sub-bullet regex"));
pub(crate) static INLINE_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]*)\]\(([^)]+)\)").expect("valid inline link regex"));
pub(crate) static TOPIC_COUNTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*- \*\*Questions Solved:\*\*[ \t]*)(\d+)")
        .expect("valid topic counter regex")
});
pub(crate) static TOTAL_COUNTER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*- \*\*Total Questions Solved:\*\*[ \t]*)(\d+)")
        .expect("valid total counter regex")
});
pub(crate) static STATUS_NOT_STARTED_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?m)^([ \t]*- \*\*Status:\*\*[ \t]*)(🔴[ \t]*)?Not Started")
        .expect("valid status regex")
});

pub(crate) const DIFFICULTY_LABEL: &str = "**Difficulty:**";
pub(crate) const SOLUTION_LABEL: &str = "**Solution:**";

pub(crate) const STATUS_IN_PROGRESS: &str = "In Progress";
pub(crate) const STATUS_IN_PROGRESS_MARKER: &str = "🟡 ";

/// One physical line of a document with its byte span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Line<'a> {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset just past the line terminator (or end of text).
    pub end: usize,
    /// Line text without `\n` / `\r\n`.
    pub content: &'a str,
}

impl Line<'_> {
    pub fn has_newline(&self) -> bool {
        self.end > self.start + self.content.len()
    }

    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }
}

/// Iterates the lines of `text`, reporting offsets relative to `base`.
pub(crate) fn lines_from(text: &str, base: usize) -> impl Iterator<Item = Line<'_>> {
    let mut offset = base;
    text.split_inclusive('\n').map(move |raw| {
        let start = offset;
        offset += raw.len();
        let content = raw.strip_suffix('\n').unwrap_or(raw);
        let content = content.strip_suffix('\r').unwrap_or(content);
        Line {
            start,
            end: offset,
            content,
        }
    })
}

pub(crate) fn lines(text: &str) -> impl Iterator<Item = Line<'_>> {
    lines_from(text, 0)
}

/// Escapes literal text so it can be embedded in a locating pattern.
///
/// Every dynamic string (topic names, question titles) goes through this
/// before interpolation; titles such as `Pow(x, n)` or `[Easy] 1. Foo` would
/// otherwise change the meaning of the anchor.
pub fn literal_pattern(text: &str) -> String {
    regex::escape(text)
}

/// Builds the multi-line anchor matching `### <id>. <name>` for a topic.
pub(crate) fn topic_heading_anchor(entry: &TopicEntry) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?m)^###[ \t]+{}\.[ \t]+{}[ \t]*\r?$",
        entry.id,
        literal_pattern(entry.name)
    ))
}

/// Builds the multi-line anchor matching a question bullet with this exact title.
pub(crate) fn question_line_anchor(title: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?m)^[ \t]*- \[[ xX]\][ \t]*Question[ \t]+\d+:[ \t]*{}[ \t]*\r?$",
        literal_pattern(title)
    ))
}

/// Returns whether a line closes the current section.
///
/// Boundaries are horizontal rules (`---...`) and headings of level 1-3,
/// except the `Questions:` sub-heading some documents keep inside sections.
pub(crate) fn is_section_boundary(content: &str) -> bool {
    let trimmed = content.trim();
    if trimmed.starts_with("---") {
        return true;
    }
    SECTION_HEADING_RE.is_match(trimmed) && !is_questions_header(trimmed)
}

pub(crate) fn is_questions_header(content: &str) -> bool {
    QUESTIONS_HEADER_RE.is_match(content.trim())
}

/// Returns the title when `content` is a question bullet line.
pub(crate) fn question_bullet(content: &str) -> Option<(bool, &str)> {
    let caps = QUESTION_BULLET_RE.captures(content)?;
    let completed = caps.get(1).map(|m| m.as_str() != " ").unwrap_or(false);
    let title = caps.get(2)?.as_str().trim();
    if title.is_empty() {
        return None;
    }
    Some((completed, title))
}

/// Text after `label` when the line opens with it, bare or as a `- ` bullet.
pub(crate) fn label_value<'a>(content: &'a str, label: &str) -> Option<&'a str> {
    let trimmed = content.trim();
    let body = trimmed
        .strip_prefix("- ")
        .map(str::trim_start)
        .unwrap_or(trimmed);
    body.strip_prefix(label).map(str::trim)
}

/// Whether the line opens with any question label.
pub(crate) fn is_label_line(content: &str) -> bool {
    [DIFFICULTY_LABEL, SOLUTION_LABEL]
        .into_iter()
        .chain([
            ListKey::KeyPoints.label(),
            ListKey::EdgeCases.label(),
            ListKey::Notes.label(),
        ])
        .any(|label| label_value(content, label).is_some())
}

/// Leading whitespace of a line.
pub(crate) fn indentation(content: &str) -> &str {
    let trimmed = content.trim_start();
    &content[..content.len() - trimmed.len()]
}

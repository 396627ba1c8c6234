//! Context-free classification of document lines.
//!
//! Each line maps to exactly one [`LineKind`], checked in fixed priority
//! order. Whether the kind matters is decided by the scan state.

use crate::markup::{
    label_value, question_bullet, DIFFICULTY_LABEL, INLINE_LINK_RE, SOLUTION_LABEL,
    SUB_BULLET_RE, TOPIC_HEADING_RE,
};
use crate::model::question::ListKey;
use crate::model::topic::{topic_by_name, TopicId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LineKind<'a> {
    /// `### <n>. <name>`; `None` when the name is not in the catalog.
    TopicHeading(Option<TopicId>),
    QuestionBullet { completed: bool, title: &'a str },
    Label(Label<'a>),
    SubBullet(&'a str),
    /// Horizontal rule (`---`).
    Rule,
    Blank,
    /// Anything else, including headings that are not topic headings.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Label<'a> {
    Difficulty(&'a str),
    /// Inline link target, when the line carries one.
    Solution(Option<&'a str>),
    List(ListKey),
}

pub(crate) fn classify(content: &str) -> LineKind<'_> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return LineKind::Blank;
    }
    if trimmed.starts_with("---") {
        return LineKind::Rule;
    }
    if let Some(caps) = TOPIC_HEADING_RE.captures(trimmed) {
        let topic = caps
            .get(1)
            .and_then(|name| topic_by_name(name.as_str()))
            .map(|entry| entry.id);
        return LineKind::TopicHeading(topic);
    }
    if let Some((completed, title)) = question_bullet(content) {
        return LineKind::QuestionBullet { completed, title };
    }
    if let Some(label) = classify_label(trimmed) {
        return LineKind::Label(label);
    }
    if let Some(caps) = SUB_BULLET_RE.captures(content) {
        if let Some(text) = caps.get(1) {
            return LineKind::SubBullet(text.as_str().trim());
        }
    }
    LineKind::Other
}

fn classify_label(trimmed: &str) -> Option<Label<'_>> {
    if let Some(rest) = label_value(trimmed, DIFFICULTY_LABEL) {
        return Some(Label::Difficulty(rest));
    }
    if let Some(rest) = label_value(trimmed, SOLUTION_LABEL) {
        let target = INLINE_LINK_RE
            .captures(rest)
            .and_then(|caps| caps.get(2))
            .map(|m| m.as_str().trim())
            .filter(|value| !value.is_empty());
        return Some(Label::Solution(target));
    }
    [ListKey::KeyPoints, ListKey::EdgeCases, ListKey::Notes]
        .into_iter()
        .find(|key| label_value(trimmed, key.label()).is_some())
        .map(Label::List)
}

//! Topic section location.
//!
//! A section spans from its topic heading to the next section boundary
//! (rule or level 1-3 heading) or the end of the text.

use crate::markup::{self, is_section_boundary, lines_from, Line};
use crate::model::topic::TopicEntry;
use crate::mutator::MutationResult;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Section<'a> {
    text: &'a str,
    /// Start of the heading line.
    pub start: usize,
    /// First byte after the heading line.
    pub body_start: usize,
    /// Start of the boundary line, or the end of the text.
    pub end: usize,
}

/// A question bullet found inside a section.
#[derive(Debug, Clone, Copy)]
pub(crate) struct BulletLine<'a> {
    pub line: Line<'a>,
    pub title: &'a str,
}

impl<'a> Section<'a> {
    /// Finds the section for `entry`, or `None` when its heading is absent.
    pub fn locate(text: &'a str, entry: &TopicEntry) -> MutationResult<Option<Self>> {
        let anchor = markup::topic_heading_anchor(entry)?;
        let Some(heading) = anchor.find(text) else {
            return Ok(None);
        };
        let body_start = match text[heading.end()..].find('\n') {
            Some(offset) => heading.end() + offset + 1,
            None => text.len(),
        };
        let end = lines_from(&text[body_start..], body_start)
            .find(|line| is_section_boundary(line.content))
            .map(|line| line.start)
            .unwrap_or(text.len());

        Ok(Some(Self {
            text,
            start: heading.start(),
            body_start,
            end,
        }))
    }

    pub fn as_str(&self) -> &'a str {
        &self.text[self.start..self.end]
    }

    /// Whether a boundary line follows the section.
    pub fn is_terminated(&self) -> bool {
        self.end < self.text.len()
    }

    pub fn lines(&self) -> impl Iterator<Item = Line<'a>> {
        lines_from(self.as_str(), self.start)
    }

    pub fn body_lines(&self) -> impl Iterator<Item = Line<'a>> {
        lines_from(&self.text[self.body_start..self.end], self.body_start)
    }

    pub fn question_bullets(&self) -> Vec<BulletLine<'a>> {
        self.body_lines()
            .filter_map(|line| {
                markup::question_bullet(line.content).map(|(_, title)| BulletLine { line, title })
            })
            .collect()
    }

    /// Last non-blank line of the section (the heading at minimum).
    pub fn last_content_line(&self) -> Option<Line<'a>> {
        self.lines().filter(|line| !line.is_blank()).last()
    }
}

/// Inserts `block` after `line`, adding the missing newline when `line`
/// ends the text without one.
pub(crate) fn insert_after_line(text: &str, line: &Line<'_>, block: &str) -> String {
    let mut out = String::with_capacity(text.len() + block.len() + 1);
    out.push_str(&text[..line.end]);
    if !line.has_newline() {
        out.push('\n');
    }
    out.push_str(block);
    out.push_str(&text[line.end..]);
    out
}

//! Structured edit intents collected by presentation layers.
//!
//! # Responsibility
//! - Carry raw user input into the mutator.
//! - Validate the handful of fields the document format cannot represent.
//!
//! # Invariants
//! - `validate()` must pass before any document text is touched.
//! - Multi-line list inputs are split on newlines; blank lines are ignored.

use crate::model::question::{is_placeholder, Difficulty};
use crate::model::topic::TopicId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Validation failures for edit intents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentValidationError {
    EmptyTitle,
    /// Titles are rendered on one bullet line and must not span lines.
    MultilineTitle,
    EmptyNote,
    UnknownDifficulty(String),
    /// Text the parser treats as generator placeholder and would drop.
    PlaceholderText(&'static str),
}

impl Display for IntentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "question title cannot be empty"),
            Self::MultilineTitle => write!(f, "question title must be a single line"),
            Self::EmptyNote => write!(f, "note cannot be empty"),
            Self::UnknownDifficulty(value) => {
                write!(f, "unknown difficulty `{value}`; expected Easy|Medium|Hard")
            }
            Self::PlaceholderText(field) => {
                write!(f, "{field} cannot contain placeholder text")
            }
        }
    }
}

impl Error for IntentValidationError {}

/// Request to append a new question to a topic section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddQuestionRequest {
    /// 1-based catalog id.
    pub topic_id: TopicId,
    pub title: String,
    pub difficulty: Option<Difficulty>,
    /// External problem link; only used by the companion file.
    pub link: Option<String>,
    pub approach: Option<String>,
    pub time_complexity: Option<String>,
    pub space_complexity: Option<String>,
    /// Newline-separated key points.
    pub key_points: Option<String>,
    /// Newline-separated edge cases.
    pub edge_cases: Option<String>,
}

impl AddQuestionRequest {
    pub fn new(topic_id: TopicId, title: impl Into<String>) -> Self {
        Self {
            topic_id,
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), IntentValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(IntentValidationError::EmptyTitle);
        }
        if title.contains(['\n', '\r']) {
            return Err(IntentValidationError::MultilineTitle);
        }
        if self.key_point_lines().into_iter().any(is_placeholder) {
            return Err(IntentValidationError::PlaceholderText("key points"));
        }
        if self.edge_case_lines().into_iter().any(is_placeholder) {
            return Err(IntentValidationError::PlaceholderText("edge cases"));
        }
        Ok(())
    }

    /// Title as rendered into the document.
    pub fn trimmed_title(&self) -> &str {
        self.title.trim()
    }

    pub fn difficulty_or_default(&self) -> Difficulty {
        self.difficulty.unwrap_or_default()
    }

    pub fn key_point_lines(&self) -> Vec<&str> {
        split_input_lines(self.key_points.as_deref())
    }

    pub fn edge_case_lines(&self) -> Vec<&str> {
        split_input_lines(self.edge_cases.as_deref())
    }
}

/// Request to append one note to an existing question.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddNoteRequest {
    /// 0-based position in the topic catalog.
    pub topic_index: usize,
    /// 0-based position of the question within its topic section.
    pub question_index: usize,
    pub note: String,
}

impl AddNoteRequest {
    pub fn new(topic_index: usize, question_index: usize, note: impl Into<String>) -> Self {
        Self {
            topic_index,
            question_index,
            note: note.into(),
        }
    }

    pub fn validate(&self) -> Result<(), IntentValidationError> {
        if self.note.trim().is_empty() {
            return Err(IntentValidationError::EmptyNote);
        }
        if is_placeholder(&self.normalized_note()) {
            return Err(IntentValidationError::PlaceholderText("note"));
        }
        Ok(())
    }

    /// Note text collapsed onto one line, as written into a bullet.
    pub fn normalized_note(&self) -> String {
        self.note.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Splits optional multi-line input into trimmed, non-blank lines.
fn split_input_lines(value: Option<&str>) -> Vec<&str> {
    value
        .map(|text| {
            text.lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::{AddNoteRequest, AddQuestionRequest, IntentValidationError};

    #[test]
    fn question_title_must_be_present_and_single_line() {
        assert_eq!(
            AddQuestionRequest::new(1, "   ").validate(),
            Err(IntentValidationError::EmptyTitle)
        );
        assert_eq!(
            AddQuestionRequest::new(1, "Two\nSum").validate(),
            Err(IntentValidationError::MultilineTitle)
        );
        assert!(AddQuestionRequest::new(1, " Two Sum ").validate().is_ok());
    }

    #[test]
    fn list_inputs_skip_blank_lines() {
        let mut request = AddQuestionRequest::new(1, "Two Sum");
        request.key_points = Some("use a map\n\n  one pass  \r\n".to_string());
        assert_eq!(request.key_point_lines(), vec!["use a map", "one pass"]);
        assert!(request.edge_case_lines().is_empty());
    }

    #[test]
    fn placeholder_text_is_rejected() {
        let request = AddQuestionRequest {
            key_points: Some("use a map\nproof To Be Updated".to_string()),
            ..AddQuestionRequest::new(1, "Two Sum")
        };
        assert_eq!(
            request.validate(),
            Err(IntentValidationError::PlaceholderText("key points"))
        );
        let request = AddQuestionRequest {
            edge_cases: Some("[to be updated]".to_string()),
            ..AddQuestionRequest::new(1, "Two Sum")
        };
        assert_eq!(
            request.validate(),
            Err(IntentValidationError::PlaceholderText("edge cases"))
        );
        assert_eq!(
            AddNoteRequest::new(0, 0, "complexity proof to be\nupdated").validate(),
            Err(IntentValidationError::PlaceholderText("note"))
        );
    }

    #[test]
    fn note_is_collapsed_onto_one_line() {
        let request = AddNoteRequest::new(0, 0, "watch\n  for   overflow ");
        assert_eq!(request.normalized_note(), "watch for overflow");
        assert_eq!(
            AddNoteRequest::new(0, 0, " \n").validate(),
            Err(IntentValidationError::EmptyNote)
        );
    }
}

//! Tracker document mutator.
//!
//! # Responsibility
//! - Apply structured edit intents to full document text.
//! - Render companion solution files for new questions.
//!
//! # Invariants
//! - Every operation reads the full current text and returns full new text.
//! - Bytes outside the edited section (and the counter lines) are preserved.
//! - Failures leave the caller's text untouched; there is no partial result.
//! - Dynamic text is escaped before it is used to locate anything.

mod counters;
mod note;
mod question;
mod section;
mod template;

pub use note::add_note;
pub use question::{add_question, add_question_with_policy, solution_path, QuestionInsertion};
pub use template::{render_solution_file, SolutionFile};

use crate::model::intent::IntentValidationError;
use crate::model::topic::TopicId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type MutationResult<T> = Result<T, MutationError>;

/// How topic and document counters are updated when a question is added.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterPolicy {
    /// Add one to whatever value the counter line currently holds.
    #[default]
    Increment,
    /// Overwrite counters with the number of question bullets actually present.
    Recount,
}

/// How a caller referred to a topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopicLookup {
    /// 1-based catalog id.
    Id(TopicId),
    /// 0-based catalog position.
    Index(usize),
}

impl Display for TopicLookup {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Id(id) => write!(f, "id {id}"),
            Self::Index(index) => write!(f, "index {index}"),
        }
    }
}

/// Mutation failures surfaced to callers.
#[derive(Debug)]
pub enum MutationError {
    /// Topic is outside the catalog or its heading is missing from the text.
    TopicNotFound(TopicLookup),
    /// Question index is out of range within a resolved topic section.
    QuestionNotFound {
        topic_id: TopicId,
        question_index: usize,
    },
    InvalidIntent(IntentValidationError),
    /// A locating pattern could not be compiled.
    Pattern(regex::Error),
}

impl Display for MutationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TopicNotFound(lookup) => write!(f, "topic section not found: {lookup}"),
            Self::QuestionNotFound {
                topic_id,
                question_index,
            } => write!(
                f,
                "question not found: index {question_index} in topic {topic_id}"
            ),
            Self::InvalidIntent(err) => write!(f, "{err}"),
            Self::Pattern(err) => write!(f, "failed to build locating pattern: {err}"),
        }
    }
}

impl Error for MutationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidIntent(err) => Some(err),
            Self::Pattern(err) => Some(err),
            Self::TopicNotFound(_) | Self::QuestionNotFound { .. } => None,
        }
    }
}

impl From<IntentValidationError> for MutationError {
    fn from(value: IntentValidationError) -> Self {
        Self::InvalidIntent(value)
    }
}

impl From<regex::Error> for MutationError {
    fn from(value: regex::Error) -> Self {
        Self::Pattern(value)
    }
}

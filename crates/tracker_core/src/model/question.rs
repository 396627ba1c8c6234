//! Question record parsed from a topic section.
//!
//! # Invariants
//! - `title` is non-empty and trimmed.
//! - `topic_id` always references a catalog entry.
//! - `completed` is only ever derived from the checkbox marker.
//! - List fields never hold placeholder text.

use crate::model::intent::IntentValidationError;
use crate::model::topic::TopicId;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Placeholder token the document generator leaves in empty sub-lists.
pub const PLACEHOLDER_TOKEN: &str = "to be updated";

/// Problem difficulty. Defaults to `Easy` when the document omits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Parses a difficulty label case-insensitively.
    pub fn from_label(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "easy" => Some(Self::Easy),
            "medium" => Some(Self::Medium),
            "hard" => Some(Self::Hard),
            _ => None,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = IntentValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::from_label(value)
            .ok_or_else(|| IntentValidationError::UnknownDifficulty(value.trim().to_string()))
    }
}

/// Sub-list a detail bullet is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKey {
    KeyPoints,
    EdgeCases,
    Notes,
}

impl ListKey {
    /// Bold label text that opens this sub-list in the document.
    pub fn label(self) -> &'static str {
        match self {
            Self::KeyPoints => "**Key Points:**",
            Self::EdgeCases => "**Edge Cases:**",
            Self::Notes => "**Notes:**",
        }
    }
}

/// One practice problem entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub topic_id: TopicId,
    pub title: String,
    pub completed: bool,
    pub difficulty: Difficulty,
    /// Target of the inline solution link; mirrors `solution_path`.
    pub link: Option<String>,
    pub solution_path: Option<String>,
    pub key_points: Vec<String>,
    pub edge_cases: Vec<String>,
    pub notes: Vec<String>,
}

impl Question {
    /// Creates a question with default difficulty and empty sub-lists.
    pub fn new(topic_id: TopicId, title: impl Into<String>, completed: bool) -> Self {
        Self {
            topic_id,
            title: title.into(),
            completed,
            difficulty: Difficulty::default(),
            link: None,
            solution_path: None,
            key_points: Vec::new(),
            edge_cases: Vec::new(),
            notes: Vec::new(),
        }
    }

    pub fn list(&self, key: ListKey) -> &[String] {
        match key {
            ListKey::KeyPoints => &self.key_points,
            ListKey::EdgeCases => &self.edge_cases,
            ListKey::Notes => &self.notes,
        }
    }

    /// Appends a detail item unless it is generator placeholder text.
    ///
    /// Returns whether the item was kept.
    pub fn push_detail(&mut self, key: ListKey, value: &str) -> bool {
        let value = value.trim();
        if value.is_empty() || is_placeholder(value) {
            return false;
        }
        let list = match key {
            ListKey::KeyPoints => &mut self.key_points,
            ListKey::EdgeCases => &mut self.edge_cases,
            ListKey::Notes => &mut self.notes,
        };
        list.push(value.to_string());
        true
    }
}

/// Returns whether `value` is placeholder text (case-insensitive).
pub fn is_placeholder(value: &str) -> bool {
    value.to_lowercase().contains(PLACEHOLDER_TOKEN)
}

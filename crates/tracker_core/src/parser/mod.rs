//! Tracker document parser.
//!
//! # Responsibility
//! - Project raw document text into topics and questions.
//! - Tolerate hand-edited documents: unknown lines are skipped, never fatal.
//!
//! # Invariants
//! - `parse` never fails; empty input yields the full catalog and no questions.
//! - Questions are emitted in document order.
//! - Questions before the first catalog topic heading are dropped.
//! - Headings outside the catalog never change the current topic.

mod line;
mod state;

use crate::markup::lines;
use crate::model::question::Question;
use crate::model::topic::{topic_catalog, Topic, TopicId};
use log::debug;
use serde::{Deserialize, Serialize};
use state::ScanState;
use std::time::Instant;

/// Structured projection of one document revision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDocument {
    /// Always the full fixed catalog, in id order.
    pub topics: Vec<Topic>,
    pub questions: Vec<Question>,
}

/// Per-topic progress summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicProgress {
    pub topic_id: TopicId,
    pub name: String,
    pub total: usize,
    pub completed: usize,
}

impl ParsedDocument {
    /// Questions belonging to one topic, in document order.
    pub fn questions_for_topic(&self, topic_id: TopicId) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.topic_id == topic_id)
            .collect()
    }

    /// Progress rows for every catalog topic, including empty ones.
    pub fn topic_progress(&self) -> Vec<TopicProgress> {
        self.topics
            .iter()
            .map(|topic| {
                let questions = self.questions_for_topic(topic.id);
                TopicProgress {
                    topic_id: topic.id,
                    name: topic.name.clone(),
                    total: questions.len(),
                    completed: questions.iter().filter(|q| q.completed).count(),
                }
            })
            .collect()
    }
}

/// Parses tracker document text.
pub fn parse(text: &str) -> ParsedDocument {
    let started_at = Instant::now();
    let mut questions = Vec::new();
    let mut state = ScanState::default();

    for line in lines(text) {
        let step = state.step(line::classify(line.content));
        questions.extend(step.emitted);
        state = step.next;
    }
    questions.extend(state.finish());

    debug!(
        "event=parse module=parser status=ok bytes={} questions={} duration_ms={}",
        text.len(),
        questions.len(),
        started_at.elapsed().as_millis()
    );

    ParsedDocument {
        topics: topic_catalog(),
        questions,
    }
}

//! Explicit scan state for the line parser.
//!
//! # Invariants
//! - Only `Collecting` holds an in-progress question; leaving it flushes.
//! - A question bullet seen before any catalog topic is `Orphaned`: its detail
//!   lines are consumed and the question is never emitted.
//! - Only a catalog topic heading changes the current topic; unknown topic
//!   headings and rules flush the question but keep it.

use crate::model::question::{Difficulty, ListKey, Question};
use crate::model::topic::TopicId;
use crate::parser::line::{Label, LineKind};
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ScanState {
    /// Between questions, optionally inside a catalog topic section.
    Idle { topic: Option<TopicId> },
    /// Accumulating detail lines for one question.
    Collecting {
        question: Question,
        list: Option<ListKey>,
    },
    /// Inside a question whose topic could not be resolved.
    Orphaned,
}

impl Default for ScanState {
    fn default() -> Self {
        Self::Idle { topic: None }
    }
}

/// Outcome of feeding one line into the state machine.
pub(crate) struct Step {
    pub next: ScanState,
    /// Question completed by this transition, if any.
    pub emitted: Option<Question>,
}

impl ScanState {
    /// Topic that a question started now would belong to.
    pub fn current_topic(&self) -> Option<TopicId> {
        match self {
            Self::Idle { topic } => *topic,
            Self::Collecting { question, .. } => Some(question.topic_id),
            Self::Orphaned => None,
        }
    }

    /// Ends any in-progress question and returns it.
    pub fn finish(self) -> Option<Question> {
        match self {
            Self::Collecting { question, .. } => Some(question),
            Self::Idle { .. } | Self::Orphaned => None,
        }
    }

    pub fn step(self, kind: LineKind<'_>) -> Step {
        match kind {
            LineKind::TopicHeading(topic) => {
                let topic = topic.or_else(|| self.current_topic());
                self.close(topic)
            }
            LineKind::Rule => {
                let topic = self.current_topic();
                self.close(topic)
            }
            LineKind::QuestionBullet { completed, title } => {
                let topic = self.current_topic();
                let emitted = self.finish();
                let next = match topic {
                    Some(topic_id) => Self::Collecting {
                        question: Question::new(topic_id, title, completed),
                        list: None,
                    },
                    None => {
                        debug!("event=parse_orphan_question module=parser status=skip");
                        Self::Orphaned
                    }
                };
                Step { next, emitted }
            }
            LineKind::Label(label) => self.apply_label(label),
            LineKind::SubBullet(text) => self.append_detail(text),
            LineKind::Blank | LineKind::Other => Step {
                next: self,
                emitted: None,
            },
        }
    }

    fn close(self, topic: Option<TopicId>) -> Step {
        Step {
            emitted: self.finish(),
            next: Self::Idle { topic },
        }
    }

    fn apply_label(self, label: Label<'_>) -> Step {
        let next = match self {
            Self::Collecting { mut question, list } => {
                let list = match label {
                    Label::Difficulty(value) => {
                        match Difficulty::from_label(value) {
                            Some(difficulty) => question.difficulty = difficulty,
                            None => debug!(
                                "event=parse_difficulty module=parser status=skip reason=unknown_label"
                            ),
                        }
                        list
                    }
                    Label::Solution(target) => {
                        if let Some(target) = target {
                            question.solution_path = Some(target.to_string());
                            question.link = Some(target.to_string());
                        }
                        list
                    }
                    Label::List(key) => Some(key),
                };
                Self::Collecting { question, list }
            }
            other => other,
        };
        Step {
            next,
            emitted: None,
        }
    }

    fn append_detail(self, text: &str) -> Step {
        let next = match self {
            Self::Collecting {
                mut question,
                list: Some(key),
            } => {
                question.push_detail(key, text);
                Self::Collecting {
                    question,
                    list: Some(key),
                }
            }
            other => other,
        };
        Step {
            next,
            emitted: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ScanState;
    use crate::model::question::{Difficulty, ListKey};
    use crate::parser::line::{Label, LineKind};

    fn collecting(title: &str) -> ScanState {
        let step = ScanState::Idle { topic: Some(2) }.step(LineKind::QuestionBullet {
            completed: false,
            title,
        });
        assert!(step.emitted.is_none());
        step.next
    }

    #[test]
    fn bullet_without_topic_is_orphaned() {
        let step = ScanState::default().step(LineKind::QuestionBullet {
            completed: true,
            title: "Lost",
        });
        assert_eq!(step.next, ScanState::Orphaned);
        let step = step.next.step(LineKind::Label(Label::List(ListKey::Notes)));
        let step = step.next.step(LineKind::SubBullet("ignored"));
        assert!(step.next.finish().is_none());
    }

    #[test]
    fn labels_and_details_fill_the_question() {
        let state = collecting("Reverse List")
            .step(LineKind::Label(Label::Difficulty("hard")))
            .next
            .step(LineKind::Label(Label::List(ListKey::EdgeCases)))
            .next
            .step(LineKind::Blank)
            .next
            .step(LineKind::SubBullet("single node"))
            .next;
        let question = state.finish().expect("question in progress");
        assert_eq!(question.topic_id, 2);
        assert_eq!(question.difficulty, Difficulty::Hard);
        assert_eq!(question.edge_cases, vec!["single node".to_string()]);
    }

    #[test]
    fn sub_bullet_without_list_key_is_ignored() {
        let state = collecting("Cycle")
            .step(LineKind::SubBullet("stray"))
            .next;
        let question = state.finish().expect("question in progress");
        assert!(question.key_points.is_empty());
        assert!(question.notes.is_empty());
    }

    #[test]
    fn rule_flushes_and_keeps_topic() {
        let step = collecting("Merge").step(LineKind::Rule);
        assert_eq!(step.emitted.map(|q| q.title), Some("Merge".to_string()));
        assert_eq!(step.next, ScanState::Idle { topic: Some(2) });
    }

    #[test]
    fn unknown_topic_heading_flushes_and_keeps_topic() {
        let step = collecting("Merge").step(LineKind::TopicHeading(None));
        assert_eq!(step.emitted.map(|q| q.title), Some("Merge".to_string()));
        assert_eq!(step.next, ScanState::Idle { topic: Some(2) });

        let step = step.next.step(LineKind::TopicHeading(Some(5)));
        assert_eq!(step.next.current_topic(), Some(5));
    }

    #[test]
    fn other_lines_keep_the_question_open() {
        let state = collecting("Merge")
            .step(LineKind::Label(Label::List(ListKey::Notes)))
            .next
            .step(LineKind::Other)
            .next
            .step(LineKind::SubBullet("after a heading"))
            .next;
        let question = state.finish().expect("question in progress");
        assert_eq!(question.notes, vec!["after a heading".to_string()]);
    }
}

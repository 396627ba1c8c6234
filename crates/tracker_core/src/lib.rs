//! Core domain logic for the practice tracker.
//! This crate owns the document format: parsing, edits and storage contracts.

pub mod config;
pub mod logging;
mod markup;
pub mod model;
pub mod mutator;
pub mod parser;
pub mod service;
pub mod store;

pub use config::{ConfigError, TrackerConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use markup::literal_pattern;
pub use model::intent::{AddNoteRequest, AddQuestionRequest, IntentValidationError};
pub use model::question::{Difficulty, ListKey, Question};
pub use model::topic::{topic_by_id, topic_by_index, topic_catalog, Topic, TopicEntry, TopicId};
pub use mutator::{
    add_note, add_question, add_question_with_policy, CounterPolicy, MutationError,
    MutationResult, QuestionInsertion, SolutionFile,
};
pub use parser::{parse, ParsedDocument, TopicProgress};
pub use service::tracker_service::{
    AddQuestionOutcome, ServiceError, ServiceResult, SolutionFileStatus, TrackerService,
    TrackerSnapshot,
};
pub use store::{
    DocumentStore, FetchedDocument, FsDocumentStore, MemoryDocumentStore, StoreError,
    StoreResult, VersionToken,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

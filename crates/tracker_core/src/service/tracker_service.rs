//! Tracker use-case service.
//!
//! # Responsibility
//! - Run the fetch -> parse/mutate -> conditional write cycle against a
//!   caller-owned document store.
//! - Create companion solution files when they do not exist yet.
//!
//! # Invariants
//! - Every document write carries the version token of the read that
//!   produced the edited text.
//! - A conflict fails the whole operation; nothing is retried here.
//! - No parsed state is cached between calls.

use crate::model::intent::{AddNoteRequest, AddQuestionRequest};
use crate::model::question::Question;
use crate::model::topic::TopicId;
use crate::mutator::{self, CounterPolicy, MutationError, SolutionFile};
use crate::parser::{self, ParsedDocument, TopicProgress};
use crate::store::{DocumentStore, StoreError, VersionToken};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

pub const DEFAULT_DOCUMENT_PATH: &str = "README.md";

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for tracker use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Intent could not be applied to the current text.
    Mutation(MutationError),
    /// Store-layer failure, including version conflicts.
    Store(StoreError),
}

impl ServiceError {
    /// Whether the caller should restart from a fresh read.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Store(StoreError::Conflict(_)))
    }
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Mutation(err) => write!(f, "{err}"),
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Mutation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<MutationError> for ServiceError {
    fn from(value: MutationError) -> Self {
        Self::Mutation(value)
    }
}

impl From<StoreError> for ServiceError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Parsed document together with the version it was read at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerSnapshot {
    pub document: ParsedDocument,
    pub version: VersionToken,
}

impl TrackerSnapshot {
    pub fn progress(&self) -> Vec<TopicProgress> {
        self.document.topic_progress()
    }

    pub fn questions_for_topic(&self, topic_id: TopicId) -> Vec<&Question> {
        self.document.questions_for_topic(topic_id)
    }
}

/// What happened to the companion file of a new question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolutionFileStatus {
    Created,
    /// A file already exists at the path; it was left untouched.
    Skipped,
    /// The document was updated but the file could not be written.
    Failed(String),
}

/// Result of a successful `add_question`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddQuestionOutcome {
    pub question_number: usize,
    pub document_version: VersionToken,
    pub solution_path: String,
    pub solution_status: SolutionFileStatus,
}

/// Tracker service over an explicitly owned store.
pub struct TrackerService<S: DocumentStore> {
    store: S,
    document_path: String,
    counter_policy: CounterPolicy,
}

impl<S: DocumentStore> TrackerService<S> {
    /// Creates a service editing `document_path` inside `store`.
    pub fn new(store: S, document_path: impl Into<String>) -> Self {
        Self {
            store,
            document_path: document_path.into(),
            counter_policy: CounterPolicy::default(),
        }
    }

    pub fn with_counter_policy(mut self, policy: CounterPolicy) -> Self {
        self.counter_policy = policy;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn document_path(&self) -> &str {
        &self.document_path
    }

    pub fn counter_policy(&self) -> CounterPolicy {
        self.counter_policy
    }

    /// Fetches and parses the tracked document.
    pub fn load(&self) -> ServiceResult<TrackerSnapshot> {
        let fetched = self.store.fetch(&self.document_path)?;
        let document = parser::parse(fetched.text()?);
        info!(
            "event=tracker_load module=service status=ok questions={}",
            document.questions.len()
        );
        Ok(TrackerSnapshot {
            document,
            version: fetched.version,
        })
    }

    /// Adds a question and creates its companion file when absent.
    ///
    /// # Errors
    /// - `Mutation` when the topic is missing or the request is invalid; the
    ///   store is not written.
    /// - `Store(Conflict)` when the document changed since it was read.
    pub fn add_question(&self, request: &AddQuestionRequest) -> ServiceResult<AddQuestionOutcome> {
        let started_at = Instant::now();
        let fetched = self.store.fetch(&self.document_path)?;
        let insertion =
            mutator::add_question_with_policy(fetched.text()?, request, self.counter_policy)?;

        let message = format!("Add question: {}", request.trimmed_title());
        let document_version = self
            .write_document(insertion.text.as_bytes(), &message, &fetched.version)
            .inspect_err(|err| log_write_failure("add_question", err))?;
        let solution_status = self.ensure_solution_file(&insertion.solution, request);

        info!(
            "event=add_question module=service status=ok question_number={} solution={:?} duration_ms={}",
            insertion.question_number,
            solution_status,
            started_at.elapsed().as_millis()
        );
        Ok(AddQuestionOutcome {
            question_number: insertion.question_number,
            document_version,
            solution_path: insertion.solution.path,
            solution_status,
        })
    }

    /// Appends a note to an existing question.
    pub fn add_note(&self, request: &AddNoteRequest) -> ServiceResult<VersionToken> {
        let fetched = self.store.fetch(&self.document_path)?;
        let updated = mutator::add_note(fetched.text()?, request)?;
        let version = self
            .write_document(updated.as_bytes(), "Add note to question", &fetched.version)
            .inspect_err(|err| log_write_failure("add_note", err))?;
        info!("event=add_note module=service status=ok");
        Ok(version)
    }

    fn write_document(
        &self,
        content: &[u8],
        message: &str,
        expected: &VersionToken,
    ) -> Result<VersionToken, StoreError> {
        self.store
            .write(&self.document_path, content, message, Some(expected))
    }

    fn ensure_solution_file(
        &self,
        solution: &SolutionFile,
        request: &AddQuestionRequest,
    ) -> SolutionFileStatus {
        match self.store.exists(&solution.path) {
            Ok(true) => return SolutionFileStatus::Skipped,
            Ok(false) => {}
            Err(err) => {
                warn!(
                    "event=solution_file module=service status=error stage=exists error={}",
                    err
                );
                return SolutionFileStatus::Failed(err.to_string());
            }
        }

        let message = format!("Add solution file for {}", request.trimmed_title());
        match self
            .store
            .write(&solution.path, solution.content.as_bytes(), &message, None)
        {
            Ok(_) => SolutionFileStatus::Created,
            Err(StoreError::Conflict(_)) => SolutionFileStatus::Skipped,
            Err(err) => {
                warn!(
                    "event=solution_file module=service status=error stage=write error={}",
                    err
                );
                SolutionFileStatus::Failed(err.to_string())
            }
        }
    }
}

fn log_write_failure(operation: &str, err: &StoreError) {
    match err {
        StoreError::Conflict(_) => warn!(
            "event={} module=service status=conflict action=retry_from_fresh_read",
            operation
        ),
        other => error!(
            "event={} module=service status=error error={}",
            operation, other
        ),
    }
}

//! Document store boundary.
//!
//! # Responsibility
//! - Define the fetch/conditional-write contract the service relies on.
//! - Provide in-memory and filesystem implementations.
//!
//! # Invariants
//! - Every write carrying a version token succeeds only if the stored
//!   content still has that token (optimistic concurrency).
//! - A write without a token is create-only.
//! - Store paths are relative, `/`-separated and never escape the store root.
//!
//! # See also
//! - `service::tracker_service` for the read-mutate-write cycle.

mod fs;
mod memory;

pub use fs::FsDocumentStore;
pub use memory::{CommitRecord, MemoryDocumentStore};

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StoreResult<T> = Result<T, StoreError>;

/// Opaque identifier of one stored content version.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VersionToken(String);

impl VersionToken {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VersionToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content returned by [`DocumentStore::fetch`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedDocument {
    pub path: String,
    pub content: Vec<u8>,
    pub version: VersionToken,
}

impl FetchedDocument {
    /// Content decoded as UTF-8.
    pub fn text(&self) -> StoreResult<&str> {
        std::str::from_utf8(&self.content).map_err(|_| StoreError::InvalidUtf8(self.path.clone()))
    }
}

/// Store failures.
#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    /// Stored content no longer matches the expected version, or a
    /// create-only write hit an existing path.
    Conflict(String),
    InvalidPath(String),
    InvalidUtf8(String),
    Io(std::io::Error),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => write!(f, "document not found: {path}"),
            Self::Conflict(path) => write!(f, "document changed since it was read: {path}"),
            Self::InvalidPath(path) => write!(f, "invalid store path: `{path}`"),
            Self::InvalidUtf8(path) => write!(f, "document is not valid UTF-8: {path}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Versioned document storage consumed by the tracker service.
pub trait DocumentStore {
    /// Reads a document and its current version token.
    fn fetch(&self, path: &str) -> StoreResult<FetchedDocument>;

    /// Writes a document.
    ///
    /// `expected = Some(token)` updates an existing document only if its
    /// version still equals `token`; `None` creates a new document and fails
    /// with `Conflict` if one exists. Returns the new version token.
    fn write(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        expected: Option<&VersionToken>,
    ) -> StoreResult<VersionToken>;

    fn exists(&self, path: &str) -> StoreResult<bool> {
        match self.fetch(path) {
            Ok(_) => Ok(true),
            Err(StoreError::NotFound(_)) => Ok(false),
            Err(err) => Err(err),
        }
    }
}

/// Normalizes a store path to relative `/`-separated form.
///
/// Empty components are skipped; `.` and `..` components, absolute paths and
/// drive prefixes (`C:`) are rejected. Colons elsewhere are kept.
pub(crate) fn normalize_store_path(path: &str) -> StoreResult<String> {
    let unified = path.trim().replace('\\', "/");
    let invalid = || StoreError::InvalidPath(path.to_string());
    if unified.starts_with('/') {
        return Err(invalid());
    }

    let mut parts = Vec::new();
    for part in unified.split('/') {
        match part {
            "" => continue,
            "." | ".." => return Err(invalid()),
            other if parts.is_empty() && is_drive_prefix(other) => return Err(invalid()),
            other => parts.push(other),
        }
    }
    if parts.is_empty() {
        return Err(invalid());
    }
    Ok(parts.join("/"))
}

fn is_drive_prefix(component: &str) -> bool {
    let mut chars = component.chars();
    matches!(
        (chars.next(), chars.next()),
        (Some(letter), Some(':')) if letter.is_ascii_alphabetic()
    )
}

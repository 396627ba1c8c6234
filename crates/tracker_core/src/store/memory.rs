//! In-process document store.

use crate::store::{
    normalize_store_path, DocumentStore, FetchedDocument, StoreError, StoreResult, VersionToken,
};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// One accepted write, kept for inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub path: String,
    pub message: String,
    pub version: VersionToken,
}

#[derive(Debug, Clone)]
struct StoredDocument {
    content: Vec<u8>,
    version: VersionToken,
}

#[derive(Debug, Default)]
struct MemoryState {
    documents: BTreeMap<String, StoredDocument>,
    commits: Vec<CommitRecord>,
}

/// Map-backed store issuing a fresh random version token on every write.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    state: Mutex<MemoryState>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a document without recording a commit.
    pub fn insert(&self, path: &str, content: impl Into<Vec<u8>>) -> StoreResult<VersionToken> {
        let path = normalize_store_path(path)?;
        let version = fresh_version();
        self.lock().documents.insert(
            path,
            StoredDocument {
                content: content.into(),
                version: version.clone(),
            },
        );
        Ok(version)
    }

    /// Accepted writes in order.
    pub fn commits(&self) -> Vec<CommitRecord> {
        self.lock().commits.clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.lock().documents.keys().cloned().collect()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn fetch(&self, path: &str) -> StoreResult<FetchedDocument> {
        let path = normalize_store_path(path)?;
        let state = self.lock();
        let stored = state
            .documents
            .get(&path)
            .ok_or_else(|| StoreError::NotFound(path.clone()))?;
        Ok(FetchedDocument {
            path,
            content: stored.content.clone(),
            version: stored.version.clone(),
        })
    }

    fn write(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        expected: Option<&VersionToken>,
    ) -> StoreResult<VersionToken> {
        let path = normalize_store_path(path)?;
        let mut state = self.lock();
        match (state.documents.get(&path), expected) {
            (Some(stored), Some(expected)) if &stored.version != expected => {
                return Err(StoreError::Conflict(path));
            }
            (Some(_), None) => return Err(StoreError::Conflict(path)),
            (None, Some(_)) => return Err(StoreError::NotFound(path)),
            _ => {}
        }

        let version = fresh_version();
        state.documents.insert(
            path.clone(),
            StoredDocument {
                content: content.to_vec(),
                version: version.clone(),
            },
        );
        state.commits.push(CommitRecord {
            path,
            message: message.to_string(),
            version: version.clone(),
        });
        Ok(version)
    }
}

fn fresh_version() -> VersionToken {
    VersionToken::new(Uuid::new_v4().to_string())
}

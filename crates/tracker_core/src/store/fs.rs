//! Directory-backed document store.
//!
//! Version tokens are the SHA-256 of the file content, so any out-of-band
//! edit between fetch and write is reported as a conflict.

use crate::store::{
    normalize_store_path, DocumentStore, FetchedDocument, StoreError, StoreResult, VersionToken,
};
use log::{error, info};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Store rooted at a local directory; store paths map to files below it.
#[derive(Debug, Clone)]
pub struct FsDocumentStore {
    root: PathBuf,
}

impl FsDocumentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> StoreResult<(String, PathBuf)> {
        let normalized = normalize_store_path(path)?;
        let full = normalized
            .split('/')
            .fold(self.root.clone(), |acc, part| acc.join(part));
        Ok((normalized, full))
    }

    fn read_current(&self, normalized: &str, full: &Path) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(full) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => {
                error!(
                    "event=store_read module=store status=error path={} error={}",
                    normalized, err
                );
                Err(err.into())
            }
        }
    }
}

impl DocumentStore for FsDocumentStore {
    fn fetch(&self, path: &str) -> StoreResult<FetchedDocument> {
        let (normalized, full) = self.resolve(path)?;
        let content = self
            .read_current(&normalized, &full)?
            .ok_or_else(|| StoreError::NotFound(normalized.clone()))?;
        let version = content_version(&content);
        Ok(FetchedDocument {
            path: normalized,
            content,
            version,
        })
    }

    fn write(
        &self,
        path: &str,
        content: &[u8],
        message: &str,
        expected: Option<&VersionToken>,
    ) -> StoreResult<VersionToken> {
        let started_at = Instant::now();
        let (normalized, full) = self.resolve(path)?;
        let current = self.read_current(&normalized, &full)?;

        match (current.as_deref(), expected) {
            (Some(existing), Some(expected)) if &content_version(existing) != expected => {
                info!(
                    "event=store_write module=store status=conflict path={}",
                    normalized
                );
                return Err(StoreError::Conflict(normalized));
            }
            (Some(_), None) => return Err(StoreError::Conflict(normalized)),
            (None, Some(_)) => return Err(StoreError::NotFound(normalized)),
            _ => {}
        }

        if let Some(parent) = full.parent() {
            fs::create_dir_all(parent)?;
        }
        // Write-then-rename keeps readers from observing a half-written file.
        let staging = full.with_extension("tracker-tmp");
        fs::write(&staging, content)?;
        if let Err(err) = fs::rename(&staging, &full) {
            let _ = fs::remove_file(&staging);
            error!(
                "event=store_write module=store status=error path={} error={}",
                normalized, err
            );
            return Err(err.into());
        }

        info!(
            "event=store_write module=store status=ok path={} bytes={} message_chars={} duration_ms={}",
            normalized,
            content.len(),
            message.chars().count(),
            started_at.elapsed().as_millis()
        );
        Ok(content_version(content))
    }
}

/// Hex SHA-256 of `content`.
pub(crate) fn content_version(content: &[u8]) -> VersionToken {
    let mut hasher = Sha256::new();
    hasher.update(content);
    VersionToken::new(hex::encode(hasher.finalize()))
}

//! Tracker configuration.
//!
//! # Responsibility
//! - Describe where the tracked document lives and how edits behave.
//! - Load/save the configuration as TOML with per-field defaults.
//!
//! # Invariants
//! - `validate()` passes before a config is used to build a service.
//! - `log_dir`, when set, is absolute (same rule as `init_logging`).

use crate::logging::default_log_level;
use crate::mutator::CounterPolicy;
use crate::service::tracker_service::{TrackerService, DEFAULT_DOCUMENT_PATH};
use crate::store::FsDocumentStore;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    Serialize(toml::ser::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Parse(err) => write!(f, "invalid config file: {err}"),
            Self::Serialize(err) => write!(f, "failed to serialize config: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

/// Tracker configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Directory backing the filesystem store.
    #[serde(default = "default_root_dir")]
    pub root_dir: PathBuf,

    /// Tracked document path inside the store.
    #[serde(default = "default_document_path")]
    pub document_path: String,

    /// One of `trace|debug|info|warn|error`.
    #[serde(default = "default_level")]
    pub log_level: String,

    /// Absolute directory for rolling logs; logging stays off when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    #[serde(default)]
    pub counter_policy: CounterPolicy,
}

fn default_root_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_document_path() -> String {
    DEFAULT_DOCUMENT_PATH.to_string()
}

fn default_level() -> String {
    default_log_level().to_string()
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            root_dir: default_root_dir(),
            document_path: default_document_path(),
            log_level: default_level(),
            log_dir: None,
            counter_policy: CounterPolicy::default(),
        }
    }
}

impl TrackerConfig {
    /// Loads and validates a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.document_path.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "document_path cannot be empty".to_string(),
            ));
        }
        if let Some(log_dir) = &self.log_dir {
            if !log_dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    log_dir.display()
                )));
            }
        }
        Ok(())
    }

    /// Builds a service over a filesystem store rooted at `root_dir`.
    pub fn open_service(&self) -> TrackerService<FsDocumentStore> {
        TrackerService::new(
            FsDocumentStore::new(self.root_dir.clone()),
            self.document_path.clone(),
        )
        .with_counter_policy(self.counter_policy)
    }
}

//! Error types for nuprune
//!
//! Fatal errors use `NuPruneResult<T>`. Per-item failures that the run
//! recovers from (`ManifestError`, `DeletionError`) are collected and
//! reported instead of being propagated.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for nuprune operations
pub type NuPruneResult<T> = Result<T, NuPruneError>;

/// Errors that abort a command
#[derive(Error, Debug)]
pub enum NuPruneError {
    // Input errors
    #[error("Workspace directory not found: {0}")]
    WorkspaceNotFound(PathBuf),

    #[error("Package cache directory not found: {0}")]
    CacheRootNotFound(PathBuf),

    #[error("Could not determine the home directory for the default package cache")]
    HomeDirUnknown,

    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Execution errors
    #[error("Failed to start worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("Background task failed: {0}")]
    Task(String),

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl NuPruneError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::CacheRootNotFound(_) => {
                Some("Pass --cache <DIR> or set NUGET_PACKAGES to your global packages folder")
            }
            Self::HomeDirUnknown => Some("Pass --cache <DIR> or set NUGET_PACKAGES"),
            Self::WorkspaceNotFound(_) => Some("Pass an existing directory as WORKSPACE"),
            Self::ConfigInvalid { .. } => Some("Run: nuprune config init --force"),
            _ => None,
        }
    }
}

impl From<tokio::task::JoinError> for NuPruneError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Task(err.to_string())
    }
}

/// A manifest that could not be read or parsed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to parse {}: {reason}", path.display())]
pub struct ManifestError {
    pub path: PathBuf,
    pub reason: String,
}

/// A cache directory that could not be removed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("failed to delete {}: {reason}", path.display())]
pub struct DeletionError {
    pub path: PathBuf,
    pub reason: String,
}

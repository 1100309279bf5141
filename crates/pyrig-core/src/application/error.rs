//! Application layer errors.
//!
//! These errors represent failures in orchestration, not business logic.
//! Business logic errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The persisted parameter record could not be read or parsed.
    #[error("could not load parameter record from {path}: {reason}")]
    StateLoad { path: PathBuf, reason: String },

    /// The persisted parameter record could not be written.
    #[error("could not save parameter record to {path}: {reason}")]
    StateSave { path: PathBuf, reason: String },

    /// An adapter's internal lock was poisoned.
    #[error("adapter state lock poisoned")]
    PortLock,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the target directory exists".into(),
            ],
            Self::StateLoad { path, .. } => vec![
                format!("The record at {} is unreadable or corrupt", path.display()),
                "Delete it and re-run 'pyrig init' to regenerate".into(),
            ],
            Self::StateSave { path, .. } => vec![
                format!("Could not write {}", path.display()),
                "Check permissions on the target directory".into(),
            ],
            Self::PortLock => vec!["Try again in a moment".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } | Self::PortLock => ErrorCategory::Internal,
            Self::StateLoad { .. } | Self::StateSave { .. } => ErrorCategory::Configuration,
        }
    }
}

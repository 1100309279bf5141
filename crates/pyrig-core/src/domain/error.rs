//! Domain layer errors.
//!
//! These represent violations of the schema/manifest rules themselves, not
//! orchestration failures (see `crate::application::ApplicationError`).

use thiserror::Error;

/// Errors raised by the pure domain layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A user-supplied override failed its parameter's validation rule.
    #[error("invalid value '{value}' for parameter '{name}': expected {rule}")]
    InvalidParameter {
        name: String,
        value: String,
        rule: String,
    },

    /// An override names a parameter the schema does not define.
    #[error("unknown parameter '{name}'")]
    UnknownParameter { name: String },

    /// A payload references a parameter absent from the resolved set.
    ///
    /// This is a schema-authoring bug, not a user error: the manifest and
    /// the schema have drifted apart.
    #[error("unresolved placeholder '{{{{{placeholder}}}}}' in {destination}")]
    UnresolvedPlaceholder {
        placeholder: String,
        destination: String,
    },

    /// A placeholder used a filter outside the recognized set, or applied
    /// a filter to a value of the wrong kind.
    #[error("unknown or inapplicable filter '{filter}' in {destination}")]
    UnknownFilter { filter: String, destination: String },

    /// A manifest destination escapes the target directory or is absolute.
    #[error("invalid destination '{path}': {reason}")]
    InvalidDestination { path: String, reason: String },

    /// Two manifest entries share a destination path.
    #[error("duplicate manifest destination '{path}'")]
    DuplicateDestination { path: String },

    /// The schema itself is inconsistent (e.g. a default violating its own
    /// rule, or a condition referencing a later parameter).
    #[error("invalid schema: {reason}")]
    InvalidSchema { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidParameter { name, rule, .. } => vec![
                format!("Parameter '{name}' expects {rule}"),
                "Run 'pyrig params' to see every parameter and its rule".into(),
            ],
            Self::UnknownParameter { name } => vec![
                format!("'{name}' is not a recognised parameter"),
                "Run 'pyrig params' to list valid parameter names".into(),
            ],
            Self::UnresolvedPlaceholder { .. }
            | Self::UnknownFilter { .. }
            | Self::InvalidSchema { .. }
            | Self::DuplicateDestination { .. } => vec![
                "This is a bug in the bundled manifest or schema".into(),
                "Please report it with the full error message".into(),
            ],
            Self::InvalidDestination { .. } => vec![
                "Manifest destinations must be relative paths inside the target directory".into(),
            ],
        }
    }

    /// Coarse classification used for exit codes and styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidParameter { .. } | Self::UnknownParameter { .. } => {
                ErrorCategory::Validation
            }
            Self::UnresolvedPlaceholder { .. }
            | Self::UnknownFilter { .. }
            | Self::InvalidDestination { .. }
            | Self::DuplicateDestination { .. }
            | Self::InvalidSchema { .. } => ErrorCategory::Internal,
        }
    }
}

/// Categories of domain failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad user input (override failed validation).
    Validation,
    /// Bug in the bundled schema or manifest.
    Internal,
}

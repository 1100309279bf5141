use std::fmt;
use std::path::{Component, Path, PathBuf};

use crate::domain::error::DomainError;

/// A filesystem path guaranteed to be **relative** and **contained**.
///
/// This type encodes an important invariant: manifest destinations must
/// never escape the target directory.
///
/// Why?
/// - Absolute paths break portability
/// - `..` components can overwrite arbitrary locations
/// - Both are almost always a bug (or an attack) in generators
///
/// `RelativePath` is a *semantic guardrail*, not a filesystem abstraction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// Create a relative path, rejecting anything that could escape the
    /// target directory.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(DomainError::InvalidDestination {
                path: path.display().to_string(),
                reason: "path is empty".into(),
            });
        }
        if path.is_absolute() {
            return Err(DomainError::InvalidDestination {
                path: path.display().to_string(),
                reason: "path is absolute".into(),
            });
        }
        if path
            .components()
            .any(|c| matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_)))
        {
            return Err(DomainError::InvalidDestination {
                path: path.display().to_string(),
                reason: "path traverses outside the target directory".into(),
            });
        }
        Ok(Self(path))
    }

    /// Borrow as a `Path`.
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Resolve against a target directory root.
    pub fn under(&self, root: &Path) -> PathBuf {
        root.join(&self.0)
    }

    /// Consume into a `PathBuf`.
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

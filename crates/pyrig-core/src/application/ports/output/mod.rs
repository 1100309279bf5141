//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `pyrig-adapters` crate provides implementations.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::ParameterSet;
use crate::error::PyrigResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `pyrig_adapters::filesystem::LocalFilesystem` (production)
/// - `pyrig_adapters::filesystem::MemoryFilesystem` (testing)
///
/// ## Design Notes
///
/// - There is deliberately no `read_file`: the protection check only asks
///   whether a destination exists. Protected files' bytes are never read.
/// - Permissions are a single capability (executable or not), not a Unix
///   mode.
pub trait Filesystem: Send + Sync {
    /// Check if a path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> PyrigResult<()>;

    /// Write content to a file, overwriting if present.
    fn write_file(&self, path: &Path, content: &str) -> PyrigResult<()>;

    /// Mark a file executable (no-op on platforms without the concept).
    fn set_executable(&self, path: &Path) -> PyrigResult<()>;
}

/// Port for the persisted parameter record in a target directory.
///
/// Implemented by:
/// - `pyrig_adapters::state::TomlStateStore` (production)
///
/// The record is whole-file overwrite state, not a log. Concurrent update
/// invocations against one target are unsupported.
pub trait StateStore: Send + Sync {
    /// Load the raw key/value record from a prior invocation, if any.
    fn load(&self, target_dir: &Path) -> PyrigResult<Option<BTreeMap<String, String>>>;

    /// Overwrite the record with a newly resolved parameter set.
    fn save(&self, target_dir: &Path, params: &ParameterSet) -> PyrigResult<()>;
}

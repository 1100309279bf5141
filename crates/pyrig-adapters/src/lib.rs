//! Infrastructure adapters for Pyrig.
//!
//! Implements the driven ports declared in `pyrig_core::application::ports`:
//! filesystem access, the persisted parameter record, plus the builtin
//! manifest that ships with the binary.

pub mod builtin;
pub mod filesystem;
pub mod state;

pub use builtin::{MARKER_FILE, builtin_manifest};
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use state::{STATE_FILE, TomlStateStore};

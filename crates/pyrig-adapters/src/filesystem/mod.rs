//! Filesystem adapters implementing the `Filesystem` port.

pub mod local;
pub mod memory;

pub use local::LocalFilesystem;
pub use memory::MemoryFilesystem;

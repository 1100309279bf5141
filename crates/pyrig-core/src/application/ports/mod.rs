//! Application-layer ports.
//!
//! Driving ports are the public service APIs (`ApplyService`); driven
//! ports are the traits below, implemented by `pyrig-adapters`.

pub mod output;

pub use output::{Filesystem, StateStore};

//! Core domain layer for Pyrig.
//!
//! This module contains pure business logic with ZERO external dependencies.
//! All I/O concerns are handled via ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **No external crates**: Only std library + thiserror
//! - **Immutable values**: A `ParameterSet` never changes after `resolve`
//! - **Rich domain model**: Behavior lives in the types, not services

// Public API - what the world sees
pub mod common;
pub mod error;
pub mod manifest;
pub mod params;
pub mod schema;

// Re-exports for convenience
pub use common::RelativePath;
pub use error::{DomainError, ErrorCategory};
pub use manifest::{ActivationRule, ApplyOutcome, ApplyResult, Manifest, ManifestEntry, render};
pub use params::{Overrides, ParamValue, ParameterSet, ProjectMarker, resolve};
pub use schema::{DefaultRule, ParamKind, ParamSpec, STRICT_MYPY, Schema, builtin_schema, parse_bool};

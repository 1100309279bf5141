//! Pyrig Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Pyrig
//! tooling-config generator, following hexagonal (ports and adapters)
//! architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           pyrig-cli (CLI)               │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │            (ApplyService)               │
//! │         Orchestrates Use Cases          │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │     (Driven: Filesystem, StateStore)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    pyrig-adapters (Infrastructure)      │
//! │  (LocalFilesystem, TomlStateStore, etc) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │   (Schema, ParameterSet, Manifest)      │
//! │        No External Dependencies         │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pyrig_core::{
//!     application::ApplyService,
//!     domain::{builtin_schema, resolve, Overrides, ProjectMarker},
//! };
//!
//! // 1. Resolve parameters (pure)
//! let schema = builtin_schema();
//! let params = resolve(&schema, &Overrides::new(), ProjectMarker::Fresh).unwrap();
//!
//! // 2. Use application service (with injected adapters)
//! let service = ApplyService::new(filesystem);
//! let results = service.apply(&manifest, &params, "./my-project".as_ref()).unwrap();
//! ```

// Re-export domain layer (stable, well-defined API)
pub mod domain;

// Re-export application layer (orchestration logic)
pub mod application;

// Re-export error types
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplyService,
        ports::{Filesystem, StateStore},
    };
    pub use crate::domain::{
        ActivationRule, ApplyOutcome, ApplyResult, Manifest, ManifestEntry, Overrides, ParamKind,
        ParamSpec, ParamValue, ParameterSet, ProjectMarker, RelativePath, Schema, builtin_schema,
        resolve,
    };
    pub use crate::error::{PyrigError, PyrigResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

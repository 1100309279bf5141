//! Application services.
//!
//! One service per use case family. Services own boxed driven ports.

pub mod apply_service;

pub use apply_service::ApplyService;

//! Parsing of `-p KEY=VALUE` override arguments.
//!
//! Only the *shape* is checked here (a non-empty key, an `=` separator).
//! Whether the key names a real parameter and the value satisfies its rule
//! is the domain's job, at resolution time.

use pyrig_core::domain::Overrides;

use crate::error::{CliError, CliResult};

/// Parse repeated `KEY=VALUE` arguments into an override map.
///
/// Duplicate keys are rejected rather than silently last-wins: two
/// conflicting `-p` flags on one command line are almost always a typo.
pub fn parse_overrides(raw: &[String]) -> CliResult<Overrides> {
    let mut overrides = Overrides::new();

    for arg in raw {
        let (key, value) = arg.split_once('=').ok_or_else(|| CliError::InvalidOverride {
            raw: arg.clone(),
            reason: "missing '='".into(),
        })?;

        if key.is_empty() {
            return Err(CliError::InvalidOverride {
                raw: arg.clone(),
                reason: "empty key".into(),
            });
        }

        if overrides.insert(key.to_string(), value.to_string()).is_some() {
            return Err(CliError::InvalidOverride {
                raw: arg.clone(),
                reason: format!("'{key}' given more than once"),
            });
        }
    }

    Ok(overrides)
}

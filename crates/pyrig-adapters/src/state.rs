//! Persisted parameter record: `.pyrig.toml` in the target directory.
//!
//! Update mode reads this record at the start of an invocation (stored
//! values act as overrides for parameters the user did not re-specify) and
//! rewrites it with the newly resolved set at the end. It is whole-file
//! overwrite state, not a log.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use pyrig_core::{
    application::{ApplicationError, ports::StateStore},
    domain::ParameterSet,
    error::PyrigResult,
};

/// File name of the record inside a target directory.
pub const STATE_FILE: &str = ".pyrig.toml";

#[derive(Debug, Serialize, Deserialize)]
struct Record {
    parameters: BTreeMap<String, String>,
}

/// TOML-backed implementation of the `StateStore` port.
#[derive(Debug, Clone, Copy)]
pub struct TomlStateStore;

impl TomlStateStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TomlStateStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for TomlStateStore {
    fn load(&self, target_dir: &Path) -> PyrigResult<Option<BTreeMap<String, String>>> {
        let path = target_dir.join(STATE_FILE);
        if !path.exists() {
            debug!(path = %path.display(), "no parameter record present");
            return Ok(None);
        }

        let raw = std::fs::read_to_string(&path).map_err(|e| ApplicationError::StateLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        let record: Record = toml::from_str(&raw).map_err(|e| ApplicationError::StateLoad {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), count = record.parameters.len(), "parameter record loaded");
        Ok(Some(record.parameters))
    }

    fn save(&self, target_dir: &Path, params: &ParameterSet) -> PyrigResult<()> {
        let path = target_dir.join(STATE_FILE);
        let record = Record {
            parameters: params.to_record(),
        };

        let raw = toml::to_string_pretty(&record).map_err(|e| ApplicationError::StateSave {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        std::fs::write(&path, raw).map_err(|e| ApplicationError::StateSave {
            path: path.clone(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "parameter record saved");
        Ok(())
    }
}

//! Apply Service - main application orchestrator.
//!
//! This service coordinates the template-application workflow:
//! 1. Validate the manifest and pre-flight every active payload
//! 2. Decide per entry: write, skip (protected), or skip (inactive)
//! 3. Perform the writes
//!
//! It implements the driving port (incoming) and uses driven ports (outgoing).

use std::path::Path;

use tracing::{debug, info, instrument};

use crate::{
    application::ports::Filesystem,
    domain::{ApplyOutcome, ApplyResult, Manifest, ParameterSet},
    error::{PyrigError, PyrigResult},
};

/// Main application service.
///
/// Orchestrates activation checks, protection checks, rendering, and
/// writing for one invocation. Entries are processed strictly sequentially
/// in manifest-declaration order; writes are independent in effect, the
/// order only makes reporting deterministic.
pub struct ApplyService {
    filesystem: Box<dyn Filesystem>,
}

impl ApplyService {
    /// Create a new apply service with the given filesystem adapter.
    pub fn new(filesystem: Box<dyn Filesystem>) -> Self {
        Self { filesystem }
    }

    /// Apply the manifest to `target_dir` under the resolved parameters.
    ///
    /// Re-applying against a directory that already holds a previous run's
    /// output is the supported recovery path after an interruption: managed
    /// files are re-rendered to identical bytes and protected files stay
    /// untouched.
    ///
    /// # Errors
    ///
    /// - `DomainError::UnresolvedPlaceholder` / `UnknownFilter` — the
    ///   bundled manifest and schema disagree. Caught in the pre-flight
    ///   pass, so no file has been written when this surfaces.
    /// - `ApplicationError::FilesystemError` — a write failed; earlier
    ///   writes are kept (no rollback), remaining entries are abandoned.
    #[instrument(skip_all, fields(target = %target_dir.display(), entries = manifest.len()))]
    pub fn apply(
        &self,
        manifest: &Manifest,
        params: &ParameterSet,
        target_dir: &Path,
    ) -> PyrigResult<Vec<ApplyResult>> {
        // Pre-flight: render every active payload before the first write so
        // a schema/manifest mismatch cannot leave a partial tree behind.
        let rendered = self.preflight(manifest, params)?;

        let mut results = Vec::with_capacity(manifest.len());

        for (entry, content) in manifest.entries().iter().zip(rendered) {
            let destination = entry.destination().clone();

            let Some(content) = content else {
                debug!(%destination, "entry inactive, skipping");
                results.push(ApplyResult {
                    destination,
                    outcome: ApplyOutcome::SkippedInactive,
                });
                continue;
            };

            let path = entry.destination().under(target_dir);

            if entry.is_protected() && self.filesystem.exists(&path) {
                debug!(%destination, "protected file exists, skipping");
                results.push(ApplyResult {
                    destination,
                    outcome: ApplyOutcome::SkippedProtected,
                });
                continue;
            }

            if let Some(parent) = path.parent() {
                self.filesystem.create_dir_all(parent)?;
            }
            self.filesystem.write_file(&path, &content)?;
            if entry.is_executable() {
                self.filesystem.set_executable(&path)?;
            }

            debug!(%destination, "written");
            results.push(ApplyResult {
                destination,
                outcome: ApplyOutcome::Written,
            });
        }

        info!(
            written = results
                .iter()
                .filter(|r| r.outcome == ApplyOutcome::Written)
                .count(),
            "apply completed"
        );
        Ok(results)
    }

    /// Render every active entry up front. Inactive entries map to `None`.
    ///
    /// Protected entries are rendered too, even when the write will later
    /// be skipped: the pre-flight guarantee covers the whole manifest, and
    /// rendering never touches the existing file's bytes.
    fn preflight(
        &self,
        manifest: &Manifest,
        params: &ParameterSet,
    ) -> PyrigResult<Vec<Option<String>>> {
        manifest
            .entries()
            .iter()
            .map(|entry| {
                if entry.activation().is_active(params) {
                    entry.render(params).map(Some).map_err(PyrigError::Domain)
                } else {
                    Ok(None)
                }
            })
            .collect()
    }
}

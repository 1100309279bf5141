//! Command handlers and the apply plumbing they share.
//!
//! Each handler translates CLI arguments into domain calls and displays
//! results.  No business logic lives here; activation, protection, and
//! rendering decisions all belong to `pyrig-core`.

use std::path::Path;

use tracing::{debug, info};

use pyrig_adapters::{LocalFilesystem, MARKER_FILE, TomlStateStore, builtin_manifest};
use pyrig_core::{
    application::{ApplyService, ports::StateStore},
    domain::{ApplyOutcome, ApplyResult, Manifest, ParameterSet, ProjectMarker},
};

use crate::error::{CliError, CliResult};
use crate::output::OutputManager;

pub mod completions;
pub mod init;
pub mod params;
pub mod update;

/// Detect whether the target already belongs to an established project.
pub(crate) fn detect_marker(target: &Path) -> ProjectMarker {
    if target.join(MARKER_FILE).exists() {
        ProjectMarker::Existing
    } else {
        ProjectMarker::Fresh
    }
}

/// Whether to ask for unset parameters interactively.
///
/// Prompting requires a terminal on stdin; a piped invocation silently
/// behaves like `--defaults`.
#[cfg(feature = "interactive")]
pub(crate) fn should_prompt(defaults: bool, quiet: bool) -> bool {
    use std::io::IsTerminal as _;
    !defaults && !quiet && std::io::stdin().is_terminal()
}

/// Print the resolved parameter values (inactive ones are omitted).
pub(crate) fn show_parameters(params: &ParameterSet, out: &OutputManager) -> CliResult<()> {
    out.header("Parameters")?;
    for (name, value) in params.iter() {
        if value.is_active() {
            out.print(&format!("  {name} = {value}"))?;
        }
    }
    out.print("")?;
    Ok(())
}

/// Predict per-entry outcomes without touching the filesystem (dry run).
///
/// Mirrors the decision order of the apply service: activation first, then
/// protection.
pub(crate) fn predict(
    manifest: &Manifest,
    params: &ParameterSet,
    target: &Path,
) -> Vec<ApplyResult> {
    manifest
        .entries()
        .iter()
        .map(|entry| {
            let outcome = if !entry.activation().is_active(params) {
                ApplyOutcome::SkippedInactive
            } else if entry.is_protected() && entry.destination().under(target).exists() {
                ApplyOutcome::SkippedProtected
            } else {
                ApplyOutcome::Written
            };
            ApplyResult {
                destination: entry.destination().clone(),
                outcome,
            }
        })
        .collect()
}

/// Render the builtin manifest into `target` and persist the record, or
/// preview the outcomes when `dry_run` is set.
pub(crate) fn apply_and_record(
    target: &Path,
    params: &ParameterSet,
    dry_run: bool,
    out: &OutputManager,
) -> CliResult<()> {
    let manifest = builtin_manifest();

    if dry_run {
        out.header(&format!("Dry run for {}", target.display()))?;
        for result in predict(&manifest, params, target) {
            out.report_line(&result)?;
        }
        return Ok(());
    }

    let service = ApplyService::new(Box::new(LocalFilesystem::new()));

    out.header(&format!("Applying to {}", target.display()))?;
    debug!(target = %target.display(), entries = manifest.len(), "apply started");

    let results = service
        .apply(&manifest, params, target)
        .map_err(CliError::Core)?;

    for result in &results {
        out.report_line(result)?;
    }

    TomlStateStore::new()
        .save(target, params)
        .map_err(CliError::Core)?;

    info!(target = %target.display(), "apply completed");
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

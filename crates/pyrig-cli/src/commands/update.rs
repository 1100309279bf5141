//! Implementation of the `pyrig update` command.
//!
//! Re-renders the tooling configuration from the parameter record written by
//! a previous run.  Priority order, highest first: `--param` overrides,
//! recorded values, config-file defaults, builtin defaults.

use tracing::{debug, instrument, warn};

use pyrig_adapters::TomlStateStore;
use pyrig_core::{
    application::ports::StateStore,
    domain::{builtin_schema, resolve},
};

use crate::{
    cli::{UpdateArgs, global::GlobalArgs},
    commands::{apply_and_record, detect_marker, init::config_defaults, show_parameters},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Execute the `pyrig update` command.
///
/// Dispatch sequence:
/// 1. Load the parameter record; absence is a hard error (exit 3)
/// 2. Layer config defaults, recorded values, and `--param` overrides
/// 3. Prompt only for parameters still unset (new since the record was made)
/// 4. Resolve, apply, and rewrite the record
#[instrument(skip_all, fields(target = %args.target.display()))]
pub fn execute(
    args: UpdateArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let schema = builtin_schema();

    // 1. The record is the whole point of update mode.
    let stored = TomlStateStore::new()
        .load(&args.target)
        .map_err(CliError::Core)?
        .ok_or_else(|| CliError::NotInitialized {
            path: args.target.clone(),
        })?;
    debug!(count = stored.len(), "parameter record loaded");

    // 2. Layering.  Recorded values that no longer fit the schema are
    //    dropped with a warning so that a newer pyrig can still update an
    //    old project; the affected parameters fall back to prompting or
    //    defaults.
    let mut overrides = config_defaults(&schema, &config, &output)?;
    for (key, value) in &stored {
        match schema.get(key) {
            Some(spec) if spec.kind.accepts(value) => {
                overrides.insert(key.clone(), value.clone());
            }
            Some(_) => {
                warn!(parameter = %key, value = %value, "recorded value no longer valid");
                output.warning(&format!(
                    "recorded value '{value}' for '{key}' is no longer valid; using the default"
                ))?;
            }
            None => {
                warn!(parameter = %key, "unknown recorded parameter");
                output.warning(&format!("ignoring unknown recorded parameter '{key}'"))?;
            }
        }
    }
    overrides.extend(crate::overrides::parse_overrides(&args.params)?);

    let marker = detect_marker(&args.target);

    // 3. With a complete record this asks nothing; it only fires for
    //    parameters added to the schema after the record was written.
    #[cfg(feature = "interactive")]
    if crate::commands::should_prompt(args.defaults, global.quiet) {
        crate::prompt::collect(&schema, &mut overrides, marker)?;
    }
    debug!(quiet = global.quiet, "overrides layered");

    // 4. Resolve, apply, rewrite record.
    let params = resolve(&schema, &overrides, marker).map_err(|e| CliError::Core(e.into()))?;

    show_parameters(&params, &output)?;
    apply_and_record(&args.target, &params, args.dry_run, &output)?;

    if args.dry_run {
        output.info("Dry run: nothing was written")?;
    } else {
        output.success(&format!(
            "Tooling configuration refreshed in {}",
            args.target.display()
        ))?;
    }

    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────

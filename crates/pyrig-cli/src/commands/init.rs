//! Implementation of the `pyrig init` command.
//!
//! Responsibility: gather overrides (config file, `--param`, interactive
//! answers), resolve the parameter set, and hand off to the shared apply
//! plumbing.  No business logic lives here.

use tracing::{debug, instrument};

use pyrig_core::domain::{Overrides, Schema, builtin_schema, resolve};

use crate::{
    cli::{InitArgs, global::GlobalArgs},
    commands::{apply_and_record, detect_marker, show_parameters},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli as _},
    output::OutputManager,
    overrides::parse_overrides,
};

/// Execute the `pyrig init` command.
///
/// Dispatch sequence:
/// 1. Merge config-file defaults with `--param` overrides
/// 2. Create the target directory (skipped on `--dry-run`)
/// 3. Detect the project marker and prompt for unset parameters
/// 4. Resolve the parameter set (pure, all validation happens here)
/// 5. Apply the manifest and persist the parameter record
#[instrument(skip_all, fields(target = %args.target.display()))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let schema = builtin_schema();

    // 1. Config-file defaults sit below CLI overrides.  Unknown keys in the
    //    file are warned about rather than fatal; a `-p` typo stays fatal.
    let mut overrides = config_defaults(&schema, &config, &output)?;
    overrides.extend(parse_overrides(&args.params)?);

    // 2. The target directory is created up front so marker detection and
    //    the apply run see the same directory.
    if !args.dry_run {
        std::fs::create_dir_all(&args.target)
            .with_cli_context(|| format!("creating {}", args.target.display()))?;
    }

    let marker = detect_marker(&args.target);
    debug!(?marker, quiet = global.quiet, "project marker detected");

    // 3. Ask for anything still unset, unless non-interactive.
    #[cfg(feature = "interactive")]
    if crate::commands::should_prompt(args.defaults, global.quiet) {
        crate::prompt::collect(&schema, &mut overrides, marker)?;
    }

    // 4. Resolve: unknown keys and rule violations surface here, before any
    //    file is touched.
    let params = resolve(&schema, &overrides, marker).map_err(|e| CliError::Core(e.into()))?;

    show_parameters(&params, &output)?;

    // 5. Apply + record.
    apply_and_record(&args.target, &params, args.dry_run, &output)?;

    if args.dry_run {
        output.info("Dry run: nothing was written")?;
    } else {
        output.success(&format!(
            "Tooling configuration written to {}",
            args.target.display()
        ))?;
    }

    Ok(())
}

/// Schema-known entries from the config file's `[defaults]` table.
pub(crate) fn config_defaults(
    schema: &Schema,
    config: &AppConfig,
    output: &OutputManager,
) -> CliResult<Overrides> {
    let mut overrides = Overrides::new();
    for (key, value) in &config.defaults {
        if schema.get(key).is_some() {
            overrides.insert(key.clone(), value.clone());
        } else {
            output.warning(&format!(
                "ignoring unknown parameter '{key}' from config file"
            ))?;
        }
    }
    Ok(overrides)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

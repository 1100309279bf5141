//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "pyrig",
    bin_name = "pyrig",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f527} Opinionated Python tooling configuration",
    long_about = "Pyrig renders a curated set of Python tooling configuration \
                  files (ruff, mypy, pytest, pre-commit, CI) into a project \
                  directory from a handful of parameters.",
    after_help = "EXAMPLES:\n\
        \x20 pyrig init my-project --defaults\n\
        \x20 pyrig init . -p python_version=3.13 -p use_docker=true\n\
        \x20 pyrig update . -p line_length=100\n\
        \x20 pyrig completions bash > /usr/share/bash-completion/completions/pyrig",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Render the tooling configuration into a directory.
    #[command(
        visible_alias = "i",
        about = "Render tooling configuration into a directory",
        after_help = "EXAMPLES:\n\
            \x20 pyrig init .\n\
            \x20 pyrig init my-project --defaults\n\
            \x20 pyrig init . -p python_version=3.13 -p use_docker=true"
    )]
    Init(InitArgs),

    /// Re-render using the parameters recorded by a previous run.
    #[command(
        visible_alias = "up",
        about = "Re-render from the recorded parameters",
        after_help = "EXAMPLES:\n\
            \x20 pyrig update .\n\
            \x20 pyrig update . -p line_length=100"
    )]
    Update(UpdateArgs),

    /// List the available parameters.
    #[command(
        about = "List available parameters and their defaults",
        after_help = "EXAMPLES:\n\
            \x20 pyrig params"
    )]
    Params(ParamsArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 pyrig completions bash > ~/.local/share/bash-completion/completions/pyrig\n\
            \x20 pyrig completions zsh  > ~/.zfunc/_pyrig\n\
            \x20 pyrig completions fish > ~/.config/fish/completions/pyrig.fish"
    )]
    Completions(CompletionsArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `pyrig init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Target directory.  Created if it does not exist.
    #[arg(value_name = "DIR", default_value = ".", help = "Target directory")]
    pub target: PathBuf,

    /// Parameter overrides, repeatable.
    #[arg(
        short = 'p',
        long = "param",
        value_name = "KEY=VALUE",
        action = clap::ArgAction::Append,
        help = "Override a parameter (repeatable)"
    )]
    pub params: Vec<String>,

    /// Skip interactive prompting; unset parameters take their defaults.
    #[arg(
        long = "defaults",
        alias = "non-interactive",
        help = "Use defaults for parameters not given via --param"
    )]
    pub defaults: bool,

    /// Preview outcomes without writing any files.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── update ────────────────────────────────────────────────────────────────────

/// Arguments for `pyrig update`.
#[derive(Debug, Args)]
pub struct UpdateArgs {
    /// Target directory.  Must contain a parameter record from `pyrig init`.
    #[arg(value_name = "DIR", default_value = ".", help = "Target directory")]
    pub target: PathBuf,

    /// Parameter overrides, repeatable.  Take priority over recorded values.
    #[arg(
        short = 'p',
        long = "param",
        value_name = "KEY=VALUE",
        action = clap::ArgAction::Append,
        help = "Override a parameter (repeatable)"
    )]
    pub params: Vec<String>,

    /// Skip interactive prompting for parameters missing from the record.
    #[arg(
        long = "defaults",
        alias = "non-interactive",
        help = "Use defaults for parameters missing from the record"
    )]
    pub defaults: bool,

    /// Preview outcomes without writing any files.
    #[arg(long = "dry-run", help = "Show what would be written without writing")]
    pub dry_run: bool,
}

// ── params ────────────────────────────────────────────────────────────────────

/// Arguments for `pyrig params`.
#[derive(Debug, Args)]
pub struct ParamsArgs {}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `pyrig completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

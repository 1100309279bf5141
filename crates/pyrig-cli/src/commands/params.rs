//! Implementation of the `pyrig params` command.
//!
//! Lists every parameter with its rule, default, and activation condition.

use pyrig_core::domain::{DefaultRule, ParamSpec, builtin_schema};

use crate::{cli::ParamsArgs, error::CliResult, output::OutputManager};

pub fn execute(_args: ParamsArgs, output: OutputManager) -> CliResult<()> {
    let schema = builtin_schema();

    output.header("Parameters")?;
    for spec in schema.specs() {
        output.print(&format!("  {:<20} {}", spec.name, spec.prompt))?;
        output.print(&format!("  {:20} accepts: {}", "", spec.kind.rule()))?;
        output.print(&format!("  {:20} default: {}", "", default_display(spec)))?;
        if let Some((dep, required)) = spec.when {
            output.print(&format!("  {:20} only when {dep} = {required}", ""))?;
        }
        output.print("")?;
    }

    Ok(())
}

fn default_display(spec: &ParamSpec) -> String {
    match spec.default {
        DefaultRule::Str(s) => s.into(),
        DefaultRule::Bool(b) => b.to_string(),
        DefaultRule::BoolByMarker { fresh, existing } => {
            format!("{fresh} (fresh project), {existing} (existing project)")
        }
    }
}

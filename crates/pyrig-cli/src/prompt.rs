//! Interactive parameter prompting (behind the `interactive` feature).
//!
//! Walks the schema in order and asks for every parameter the user has not
//! already pinned with `-p`.  Activation conditions are evaluated against
//! the answers given so far, so a disabled toggle hides its dependents.

use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};

use pyrig_core::domain::{
    DefaultRule, Overrides, ParamKind, ParamSpec, ProjectMarker, Schema, parse_bool,
};

use crate::error::{CliError, CliResult};

/// Fill `overrides` with interactively collected answers.
///
/// Parameters already present in `overrides` are kept as-is and not asked
/// again.  Answers land as raw strings; validation happens once more at
/// resolution time, which keeps the prompt layer free of domain rules.
pub fn collect(
    schema: &Schema,
    overrides: &mut Overrides,
    marker: ProjectMarker,
) -> CliResult<()> {
    let theme = ColorfulTheme::default();

    for spec in schema.specs() {
        if !is_active(schema, spec, overrides, marker) {
            continue;
        }
        if overrides.contains_key(spec.name) {
            continue;
        }

        let answer = ask(&theme, spec, marker)?;
        overrides.insert(spec.name.to_string(), answer);
    }

    Ok(())
}

/// Evaluate a spec's activation condition against the answers so far.
///
/// The dependency is an earlier boolean parameter (schema invariant), so its
/// effective value is either an already-given answer or its own default.
fn is_active(
    schema: &Schema,
    spec: &ParamSpec,
    overrides: &Overrides,
    marker: ProjectMarker,
) -> bool {
    let Some((dep, required)) = spec.when else {
        return true;
    };

    let effective = overrides
        .get(dep)
        .and_then(|raw| parse_bool(raw))
        .or_else(|| schema.get(dep).and_then(|s| default_bool(s, marker)));

    effective == Some(required)
}

fn ask(theme: &ColorfulTheme, spec: &ParamSpec, marker: ProjectMarker) -> CliResult<String> {
    match spec.kind {
        ParamKind::Choice { allowed } => {
            let default_idx = match spec.default {
                DefaultRule::Str(d) => allowed.iter().position(|v| *v == d).unwrap_or(0),
                _ => 0,
            };
            let idx = Select::with_theme(theme)
                .with_prompt(spec.prompt)
                .items(allowed)
                .default(default_idx)
                .interact()
                .map_err(map_prompt_err)?;
            Ok(allowed[idx].to_string())
        }

        ParamKind::Bool => {
            let default = default_bool(spec, marker).unwrap_or(false);
            let answer = Confirm::with_theme(theme)
                .with_prompt(spec.prompt)
                .default(default)
                .interact()
                .map_err(map_prompt_err)?;
            Ok(answer.to_string())
        }

        ParamKind::Text { rule, check } => {
            let mut input = Input::<String>::with_theme(theme)
                .with_prompt(spec.prompt)
                .validate_with(move |raw: &String| -> Result<(), String> {
                    if check(raw) {
                        Ok(())
                    } else {
                        Err(format!("expected {rule}"))
                    }
                });
            if let DefaultRule::Str(d) = spec.default {
                input = input.default(d.to_string());
            }
            input.interact_text().map_err(map_prompt_err)
        }
    }
}

/// Marker-adjusted default for a boolean parameter; `None` for non-booleans.
fn default_bool(spec: &ParamSpec, marker: ProjectMarker) -> Option<bool> {
    match spec.default {
        DefaultRule::Bool(b) => Some(b),
        DefaultRule::BoolByMarker { fresh, existing } => Some(match marker {
            ProjectMarker::Fresh => fresh,
            ProjectMarker::Existing => existing,
        }),
        DefaultRule::Str(_) => None,
    }
}

fn map_prompt_err(e: dialoguer::Error) -> CliError {
    match e {
        dialoguer::Error::IO(io) if io.kind() == std::io::ErrorKind::Interrupted => {
            CliError::Cancelled
        }
        dialoguer::Error::IO(io) => CliError::IoError {
            message: "interactive prompt failed".into(),
            source: io,
        },
        _ => CliError::Cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyrig_core::domain::builtin_schema;

    fn overrides(pairs: &[(&str, &str)]) -> Overrides {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn conditional_schema() -> Schema {
        Schema::new(vec![
            ParamSpec {
                name: "enable_extra",
                prompt: "extra?",
                kind: ParamKind::Bool,
                default: DefaultRule::Bool(false),
                when: None,
            },
            ParamSpec {
                name: "extra_flavour",
                prompt: "flavour",
                kind: ParamKind::Choice {
                    allowed: &["mild", "hot"],
                },
                default: DefaultRule::Str("mild"),
                when: Some(("enable_extra", true)),
            },
        ])
        .unwrap()
    }

    #[test]
    fn condition_follows_given_answer() {
        let schema = conditional_schema();
        let spec = schema.get("extra_flavour").unwrap();

        let on = overrides(&[("enable_extra", "true")]);
        let off = overrides(&[("enable_extra", "false")]);
        assert!(is_active(&schema, spec, &on, ProjectMarker::Fresh));
        assert!(!is_active(&schema, spec, &off, ProjectMarker::Fresh));
    }

    #[test]
    fn condition_falls_back_to_dependency_default() {
        let schema = conditional_schema();
        let spec = schema.get("extra_flavour").unwrap();
        // enable_extra defaults to false, so the dependent stays hidden.
        assert!(!is_active(&schema, spec, &Overrides::new(), ProjectMarker::Fresh));
    }

    #[test]
    fn unconditional_specs_are_always_active() {
        let schema = builtin_schema();
        for spec in schema.specs() {
            assert!(is_active(&schema, spec, &Overrides::new(), ProjectMarker::Fresh));
        }
    }

    #[test]
    fn marker_adjusts_boolean_default() {
        let schema = builtin_schema();
        let strict = schema.get("strict_mypy").unwrap();
        assert_eq!(default_bool(strict, ProjectMarker::Fresh), Some(true));
        assert_eq!(default_bool(strict, ProjectMarker::Existing), Some(false));
    }

    #[test]
    fn text_parameters_have_no_boolean_default() {
        let schema = builtin_schema();
        let line = schema.get("line_length").unwrap();
        assert_eq!(default_bool(line, ProjectMarker::Fresh), None);
    }
}

//! Parameter schema: the single registry of everything pyrig asks for.
//!
//! # Design
//!
//! The schema is a static data table. Adding a parameter:
//!
//! 1. Add a [`ParamSpec`] entry to the table in [`builtin_schema`]
//! 2. Reference it from a payload placeholder or an activation rule
//! 3. Done — resolution, prompting, and validation need no changes
//!
//! Invariant (checked by [`Schema::validate`]): every default satisfies its
//! own rule, choice defaults are members of their allowed set, and activation
//! conditions only reference *earlier* boolean parameters.

use crate::domain::error::DomainError;

/// How a parameter is typed and validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// One value out of a closed set.
    Choice { allowed: &'static [&'static str] },
    /// A yes/no toggle.
    Bool,
    /// Free text constrained by a validation rule.
    ///
    /// `check` is the machine rule; `rule` is the human-readable rendering
    /// of the same constraint, used verbatim in error messages.
    Text {
        rule: &'static str,
        check: fn(&str) -> bool,
    },
}

impl ParamKind {
    /// Human-readable description of the accepted values.
    pub fn rule(&self) -> String {
        match self {
            Self::Choice { allowed } => format!("one of {}", allowed.join(", ")),
            Self::Bool => "a boolean (true/false, yes/no, 1/0)".into(),
            Self::Text { rule, .. } => (*rule).into(),
        }
    }

    /// Whether `raw` satisfies this kind's rule.
    pub fn accepts(&self, raw: &str) -> bool {
        match self {
            Self::Choice { allowed } => allowed.contains(&raw),
            Self::Bool => parse_bool(raw).is_some(),
            Self::Text { check, .. } => check(raw),
        }
    }
}

/// Parse the boolean aliases accepted in overrides and stored records.
pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" | "on" => Some(true),
        "false" | "no" | "0" | "off" => Some(false),
        _ => None,
    }
}

/// Default value for a parameter when no override is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultRule {
    /// Fixed string default (choice and text parameters).
    Str(&'static str),
    /// Fixed boolean default.
    Bool(bool),
    /// Boolean default that depends on whether the target already carries
    /// a project marker. This is the one piece of conditional default
    /// logic in the system (the strictness parameter).
    BoolByMarker { fresh: bool, existing: bool },
}

/// One named, typed configuration value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    /// Identifier, unique within the schema.
    pub name: &'static str,
    /// Question shown when prompting interactively.
    pub prompt: &'static str,
    pub kind: ParamKind,
    pub default: DefaultRule,
    /// Only resolve this parameter when the named earlier boolean
    /// parameter resolved to the given value; otherwise it is inactive.
    pub when: Option<(&'static str, bool)>,
}

/// An ordered parameter schema.
///
/// Order matters: activation conditions may only look backwards, and
/// resolution and prompting walk the schema front to back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    specs: Vec<ParamSpec>,
}

impl Schema {
    /// Build a schema from specs, checking internal consistency.
    pub fn new(specs: Vec<ParamSpec>) -> Result<Self, DomainError> {
        let schema = Self { specs };
        schema.validate()?;
        Ok(schema)
    }

    /// Specs in declaration order.
    pub fn specs(&self) -> &[ParamSpec] {
        &self.specs
    }

    /// Look up a spec by name.
    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Enforce the schema invariants.
    ///
    /// - names are unique
    /// - every default satisfies its own rule
    /// - `when` conditions reference an earlier `Bool` parameter
    pub fn validate(&self) -> Result<(), DomainError> {
        for (i, spec) in self.specs.iter().enumerate() {
            if self.specs[..i].iter().any(|s| s.name == spec.name) {
                return Err(DomainError::InvalidSchema {
                    reason: format!("duplicate parameter '{}'", spec.name),
                });
            }

            match (&spec.kind, &spec.default) {
                (ParamKind::Bool, DefaultRule::Bool(_) | DefaultRule::BoolByMarker { .. }) => {}
                (ParamKind::Bool, DefaultRule::Str(_)) => {
                    return Err(DomainError::InvalidSchema {
                        reason: format!("boolean parameter '{}' has a string default", spec.name),
                    });
                }
                (kind, DefaultRule::Str(default)) => {
                    if !kind.accepts(default) {
                        return Err(DomainError::InvalidSchema {
                            reason: format!(
                                "default '{}' for '{}' violates its own rule ({})",
                                default,
                                spec.name,
                                kind.rule()
                            ),
                        });
                    }
                }
                (_, DefaultRule::Bool(_) | DefaultRule::BoolByMarker { .. }) => {
                    return Err(DomainError::InvalidSchema {
                        reason: format!(
                            "non-boolean parameter '{}' has a boolean default",
                            spec.name
                        ),
                    });
                }
            }

            if let Some((dep, _)) = spec.when {
                let earlier = self.specs[..i].iter().find(|s| s.name == dep);
                match earlier {
                    Some(s) if s.kind == ParamKind::Bool => {}
                    Some(_) => {
                        return Err(DomainError::InvalidSchema {
                            reason: format!(
                                "'{}' depends on non-boolean parameter '{dep}'",
                                spec.name
                            ),
                        });
                    }
                    None => {
                        return Err(DomainError::InvalidSchema {
                            reason: format!(
                                "'{}' depends on '{dep}', which is not an earlier parameter",
                                spec.name
                            ),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}

// ── Builtin schema ────────────────────────────────────────────────────────────

/// Name of the strictness parameter (its default is marker-dependent).
pub const STRICT_MYPY: &str = "strict_mypy";

fn is_line_length(raw: &str) -> bool {
    raw.len() >= 2 && raw.len() <= 3 && raw.bytes().all(|b| b.is_ascii_digit())
}

/// The fixed parameter set pyrig ships with.
pub fn builtin_schema() -> Schema {
    Schema::new(vec![
        ParamSpec {
            name: "python_version",
            prompt: "Python version",
            kind: ParamKind::Choice {
                allowed: &["3.11", "3.12", "3.13"],
            },
            default: DefaultRule::Str("3.12"),
            when: None,
        },
        ParamSpec {
            name: "line_length",
            prompt: "Maximum line length",
            kind: ParamKind::Text {
                rule: "an integer between 10 and 999",
                check: is_line_length,
            },
            default: DefaultRule::Str("88"),
            when: None,
        },
        ParamSpec {
            name: STRICT_MYPY,
            prompt: "Enable strict type checking?",
            kind: ParamKind::Bool,
            // Fresh projects start strict; retrofitting an existing codebase
            // favours gradual typing.
            default: DefaultRule::BoolByMarker {
                fresh: true,
                existing: false,
            },
            when: None,
        },
        ParamSpec {
            name: "use_docker",
            prompt: "Generate a Dockerfile?",
            kind: ParamKind::Bool,
            default: DefaultRule::Bool(false),
            when: None,
        },
        ParamSpec {
            name: "use_github_actions",
            prompt: "Generate a GitHub Actions workflow?",
            kind: ParamKind::Bool,
            default: DefaultRule::Bool(true),
            when: None,
        },
    ])
    .expect("builtin schema is internally consistent")
}

//! Parameter resolution: schema + overrides + project marker → [`ParameterSet`].
//!
//! [`resolve`] is a pure function. It performs no I/O; the one environmental
//! input (is the target an existing project?) arrives pre-computed as a
//! [`ProjectMarker`].

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::schema::{DefaultRule, ParamKind, Schema, parse_bool};

/// User-supplied overrides, keyed by parameter name, values still raw.
pub type Overrides = BTreeMap<String, String>;

/// Whether the target directory already belongs to an established project.
///
/// Detected by the caller (presence of `pyproject.toml`); only influences
/// the *default* of the strictness parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectMarker {
    Fresh,
    Existing,
}

/// A resolved parameter value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    /// The parameter's activation condition was false for this invocation.
    /// Inactive values never reach rendering.
    Inactive,
}

impl ParamValue {
    /// String form used in placeholders and the persisted record.
    /// `None` for inactive parameters.
    pub fn rendered(&self) -> Option<String> {
        match self {
            Self::Str(s) => Some(s.clone()),
            Self::Bool(b) => Some(b.to_string()),
            Self::Inactive => None,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Inactive)
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Inactive => f.write_str("(inactive)"),
        }
    }
}

/// The immutable outcome of one resolution: exactly one value per schema
/// parameter, in schema order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSet {
    values: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// `true` only when the parameter resolved to an active `true` boolean.
    pub fn is_true(&self, name: &str) -> bool {
        matches!(self.get(name), Some(ParamValue::Bool(true)))
    }

    /// Iterate in schema order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Flatten to the raw key/value form persisted by the state store.
    /// Inactive parameters are omitted; they are re-derived on the next run.
    pub fn to_record(&self) -> BTreeMap<String, String> {
        self.values
            .iter()
            .filter_map(|(n, v)| v.rendered().map(|r| (n.clone(), r)))
            .collect()
    }
}

/// Resolve every schema parameter for one invocation.
///
/// Walks the schema in declaration order. For each parameter:
/// - an activation condition that evaluates false yields
///   [`ParamValue::Inactive`] (any override for it is ignored — it must not
///   leak into rendering);
/// - a supplied override is validated against the parameter's rule and fails
///   with [`DomainError::InvalidParameter`] when it does not satisfy it;
/// - otherwise the default applies, adjusted by `marker` for
///   marker-dependent defaults.
///
/// Overrides naming a parameter outside the schema fail with
/// [`DomainError::UnknownParameter`] before anything else is looked at.
pub fn resolve(
    schema: &Schema,
    overrides: &Overrides,
    marker: ProjectMarker,
) -> Result<ParameterSet, DomainError> {
    schema.validate()?;

    for name in overrides.keys() {
        if schema.get(name).is_none() {
            return Err(DomainError::UnknownParameter { name: name.clone() });
        }
    }

    let mut values: Vec<(String, ParamValue)> = Vec::with_capacity(schema.specs().len());

    for spec in schema.specs() {
        let active = match spec.when {
            None => true,
            Some((dep, required)) => values
                .iter()
                .find(|(n, _)| n == dep)
                .is_some_and(|(_, v)| matches!(v, ParamValue::Bool(b) if *b == required)),
        };

        if !active {
            debug!(parameter = spec.name, "condition false, parameter inactive");
            values.push((spec.name.to_string(), ParamValue::Inactive));
            continue;
        }

        let value = match overrides.get(spec.name) {
            Some(raw) => {
                if !spec.kind.accepts(raw) {
                    return Err(DomainError::InvalidParameter {
                        name: spec.name.to_string(),
                        value: raw.clone(),
                        rule: spec.kind.rule(),
                    });
                }
                match spec.kind {
                    ParamKind::Bool => ParamValue::Bool(
                        parse_bool(raw).expect("accepts() verified boolean form"),
                    ),
                    ParamKind::Choice { .. } | ParamKind::Text { .. } => {
                        ParamValue::Str(raw.clone())
                    }
                }
            }
            None => match spec.default {
                DefaultRule::Str(s) => ParamValue::Str(s.to_string()),
                DefaultRule::Bool(b) => ParamValue::Bool(b),
                DefaultRule::BoolByMarker { fresh, existing } => {
                    ParamValue::Bool(match marker {
                        ProjectMarker::Fresh => fresh,
                        ProjectMarker::Existing => existing,
                    })
                }
            },
        };

        values.push((spec.name.to_string(), value));
    }

    Ok(ParameterSet { values })
}

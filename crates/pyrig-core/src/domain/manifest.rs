//! Manifest model and placeholder rendering.
//!
//! A [`Manifest`] is the static list of candidate output files. Each
//! [`ManifestEntry`] carries its payload text, an activation rule, and the
//! protection/executable flags. Payloads may reference resolved parameters
//! with `{{name}}` placeholders.
//!
//! # Placeholder syntax
//!
//! - `{{name}}` — substitute the parameter's rendered value
//! - `{{name|compact}}` — value with dots stripped (`3.12` → `312`)
//! - `{{name|pybool}}` — boolean rendered Python-style (`True` / `False`)
//!
//! The token between braces must be a `snake_case` identifier (optionally
//! followed by one filter). Anything else — notably GitHub Actions'
//! `${{ matrix.foo }}` expressions — is copied through verbatim. This keeps
//! the recognized token set closed: a placeholder that *is* an identifier
//! but names no active parameter is a schema/manifest mismatch and fails
//! with [`DomainError::UnresolvedPlaceholder`].

use std::fmt;

use crate::domain::common::RelativePath;
use crate::domain::error::DomainError;
use crate::domain::params::{ParamValue, ParameterSet};

// ── Activation ────────────────────────────────────────────────────────────────

/// Condition under which a manifest entry is eligible to be written at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivationRule {
    /// Written on every invocation.
    Always,
    /// Written only when the named boolean parameter resolved to `true`.
    /// An inactive or falsy parameter deactivates the entry.
    WhenTrue(&'static str),
}

impl ActivationRule {
    /// Evaluate against a resolved parameter set.
    pub fn is_active(&self, params: &ParameterSet) -> bool {
        match self {
            Self::Always => true,
            Self::WhenTrue(name) => params.is_true(name),
        }
    }
}

// ── Entries ───────────────────────────────────────────────────────────────────

/// One output file the system may produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    destination: RelativePath,
    payload: &'static str,
    activation: ActivationRule,
    protected: bool,
    executable: bool,
}

impl ManifestEntry {
    /// Create an always-active, unprotected entry.
    ///
    /// Payloads are `&'static str` because the manifest ships compiled into
    /// the binary; it is versioned with the tool, not user-editable.
    pub fn new(destination: &str, payload: &'static str) -> Result<Self, DomainError> {
        Ok(Self {
            destination: RelativePath::new(destination)?,
            payload,
            activation: ActivationRule::Always,
            protected: false,
            executable: false,
        })
    }

    /// Only write this entry when `param` resolved to `true`.
    pub fn when_true(mut self, param: &'static str) -> Self {
        self.activation = ActivationRule::WhenTrue(param);
        self
    }

    /// Never overwrite an existing file at this destination.
    pub fn protected(mut self) -> Self {
        self.protected = true;
        self
    }

    /// Mark the rendered file executable.
    pub fn executable(mut self) -> Self {
        self.executable = true;
        self
    }

    pub fn destination(&self) -> &RelativePath {
        &self.destination
    }

    pub fn payload(&self) -> &'static str {
        self.payload
    }

    pub fn activation(&self) -> ActivationRule {
        self.activation
    }

    pub fn is_protected(&self) -> bool {
        self.protected
    }

    pub fn is_executable(&self) -> bool {
        self.executable
    }

    /// Render this entry's payload against a parameter set.
    pub fn render(&self, params: &ParameterSet) -> Result<String, DomainError> {
        render(self.payload, params, &self.destination)
    }
}

/// The static list of candidate output files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<ManifestEntry>,
}

impl Manifest {
    /// Build a manifest, enforcing unique destinations.
    pub fn new(entries: Vec<ManifestEntry>) -> Result<Self, DomainError> {
        for (i, entry) in entries.iter().enumerate() {
            if entries[..i]
                .iter()
                .any(|e| e.destination == entry.destination)
            {
                return Err(DomainError::DuplicateDestination {
                    path: entry.destination.to_string(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// Entries in declaration order (reporting order).
    pub fn entries(&self) -> &[ManifestEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// What happened to one manifest entry during an invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Rendered and written to the target directory.
    Written,
    /// File exists and the entry is protected; its bytes were never read.
    SkippedProtected,
    /// The entry's activation rule evaluated false.
    SkippedInactive,
}

impl ApplyOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Written => "written",
            Self::SkippedProtected => "skipped (protected)",
            Self::SkippedInactive => "skipped (inactive)",
        }
    }
}

impl fmt::Display for ApplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One per manifest entry per invocation; used only for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplyResult {
    pub destination: RelativePath,
    pub outcome: ApplyOutcome,
}

// ── Rendering ─────────────────────────────────────────────────────────────────

/// Substitute every recognized placeholder in `payload`.
///
/// Same inputs always yield byte-identical output: no timestamps, no
/// environment lookups.
pub fn render(
    payload: &str,
    params: &ParameterSet,
    destination: &RelativePath,
) -> Result<String, DomainError> {
    let mut out = String::with_capacity(payload.len());
    let mut rest = payload;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            // No closing braces; the remainder is literal text.
            out.push_str(&rest[start..]);
            return Ok(out);
        };
        let token = &after[..end];

        match parse_token(token) {
            Some((name, filter)) => {
                out.push_str(&substitute(name, filter, params, destination)?);
            }
            // Not an identifier token (e.g. `${{ matrix.foo }}`): literal.
            None => {
                out.push_str("{{");
                out.push_str(token);
                out.push_str("}}");
            }
        }
        rest = &after[end + 2..];
    }

    out.push_str(rest);
    Ok(out)
}

/// Split a brace-delimited token into `(name, filter)` if it is one of ours.
fn parse_token(token: &str) -> Option<(&str, Option<&str>)> {
    let (name, filter) = match token.split_once('|') {
        Some((n, f)) => (n, Some(f)),
        None => (token, None),
    };
    if is_identifier(name) && filter.is_none_or(is_identifier) {
        Some((name, filter))
    } else {
        None
    }
}

fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_lowercase() || c == '_')
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

fn substitute(
    name: &str,
    filter: Option<&str>,
    params: &ParameterSet,
    destination: &RelativePath,
) -> Result<String, DomainError> {
    let unresolved = || DomainError::UnresolvedPlaceholder {
        placeholder: name.to_string(),
        destination: destination.to_string(),
    };

    let value = params.get(name).ok_or_else(unresolved)?;
    if !value.is_active() {
        // Inactive sentinels must not leak into rendered output.
        return Err(unresolved());
    }

    match filter {
        None => value.rendered().ok_or_else(unresolved),
        Some("compact") => Ok(value
            .rendered()
            .ok_or_else(unresolved)?
            .replace('.', "")),
        Some("pybool") => match value {
            ParamValue::Bool(true) => Ok("True".into()),
            ParamValue::Bool(false) => Ok("False".into()),
            _ => Err(DomainError::UnknownFilter {
                filter: format!("{name}|pybool (not a boolean parameter)"),
                destination: destination.to_string(),
            }),
        },
        Some(other) => Err(DomainError::UnknownFilter {
            filter: other.to_string(),
            destination: destination.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::params::{Overrides, ProjectMarker, resolve};
    use crate::domain::schema::builtin_schema;

    fn params() -> ParameterSet {
        resolve(&builtin_schema(), &Overrides::new(), ProjectMarker::Fresh).unwrap()
    }

    fn dest() -> RelativePath {
        RelativePath::new("out.txt").unwrap()
    }

    #[test]
    fn plain_substitution() {
        let s = render("line-length = {{line_length}}", &params(), &dest()).unwrap();
        assert_eq!(s, "line-length = 88");
    }

    #[test]
    fn compact_filter_strips_dots() {
        let s = render("target-version = \"py{{python_version|compact}}\"", &params(), &dest())
            .unwrap();
        assert_eq!(s, "target-version = \"py312\"");
    }

    #[test]
    fn pybool_filter_renders_python_style() {
        let s = render("strict = {{strict_mypy|pybool}}", &params(), &dest()).unwrap();
        assert_eq!(s, "strict = True");
    }

    #[test]
    fn pybool_on_string_parameter_is_an_error() {
        let err = render("{{python_version|pybool}}", &params(), &dest()).unwrap_err();
        assert!(matches!(err, DomainError::UnknownFilter { .. }));
    }

    #[test]
    fn unknown_placeholder_errors_with_destination() {
        let err = render("{{no_such_param}}", &params(), &dest()).unwrap_err();
        match err {
            DomainError::UnresolvedPlaceholder {
                placeholder,
                destination,
            } => {
                assert_eq!(placeholder, "no_such_param");
                assert_eq!(destination, "out.txt");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unknown_filter_errors() {
        let err = render("{{line_length|upper}}", &params(), &dest()).unwrap_err();
        assert!(matches!(err, DomainError::UnknownFilter { .. }));
    }

    #[test]
    fn github_actions_expressions_pass_through() {
        let payload = "python-version: ${{ matrix.python-version }}";
        let s = render(payload, &params(), &dest()).unwrap();
        assert_eq!(s, payload);
    }

    #[test]
    fn unterminated_braces_are_literal() {
        let s = render("weird {{ tail", &params(), &dest()).unwrap();
        assert_eq!(s, "weird {{ tail");
    }

    #[test]
    fn rendering_is_deterministic() {
        let payload = "py = {{python_version}}, len = {{line_length}}";
        let a = render(payload, &params(), &dest()).unwrap();
        let b = render(payload, &params(), &dest()).unwrap();
        assert_eq!(a, b);
    }

    // ── manifest invariants ──────────────────────────────────────────────────

    #[test]
    fn manifest_rejects_duplicate_destinations() {
        let a = ManifestEntry::new("same.txt", "a").unwrap();
        let b = ManifestEntry::new("same.txt", "b").unwrap();
        assert!(matches!(
            Manifest::new(vec![a, b]),
            Err(DomainError::DuplicateDestination { .. })
        ));
    }

    #[test]
    fn entry_rejects_traversal_destination() {
        assert!(ManifestEntry::new("../outside.txt", "x").is_err());
        assert!(ManifestEntry::new("/abs.txt", "x").is_err());
    }

    #[test]
    fn activation_rule_consults_params() {
        let p = params();
        assert!(ActivationRule::Always.is_active(&p));
        assert!(ActivationRule::WhenTrue("use_github_actions").is_active(&p));
        assert!(!ActivationRule::WhenTrue("use_docker").is_active(&p));
        assert!(!ActivationRule::WhenTrue("no_such_param").is_active(&p));
    }

    #[test]
    fn outcome_display_matches_report_lines() {
        assert_eq!(ApplyOutcome::Written.to_string(), "written");
        assert_eq!(
            ApplyOutcome::SkippedProtected.to_string(),
            "skipped (protected)"
        );
        assert_eq!(
            ApplyOutcome::SkippedInactive.to_string(),
            "skipped (inactive)"
        );
    }
}

//! The builtin manifest: every file pyrig can generate, with its payload,
//! activation rule, and protection flag.
//!
//! The manifest ships compiled into the binary and is versioned with the
//! tool. Payloads are deliberately inert text; the only dynamic pieces are
//! `{{parameter}}` placeholders resolved at apply time.
//!
//! Entry order here is reporting order.

use pyrig_core::domain::{Manifest, ManifestEntry};

/// File whose presence marks the target as an existing project.
///
/// Its presence flips the strictness default to gradual, and the entry
/// itself is protected: once present, pyrig never overwrites it.
pub const MARKER_FILE: &str = "pyproject.toml";

const RUFF_TOML: &str = r#"# Managed by pyrig; re-rendered on every `pyrig update`.
line-length = {{line_length}}
target-version = "py{{python_version|compact}}"

[lint]
select = ["E", "F", "I", "UP", "B", "SIM"]

[lint.isort]
known-first-party = ["src"]

[format]
quote-style = "double"
"#;

const MYPY_INI: &str = r#"# Managed by pyrig; re-rendered on every `pyrig update`.
[mypy]
python_version = {{python_version}}
strict = {{strict_mypy|pybool}}
warn_unused_configs = True
pretty = True

[mypy-tests.*]
disallow_untyped_defs = False
"#;

const PYTEST_INI: &str = r#"# Managed by pyrig; re-rendered on every `pyrig update`.
[pytest]
addopts = -ra --strict-markers --strict-config
testpaths = tests
xfail_strict = True
"#;

const PRE_COMMIT: &str = r#"# Managed by pyrig; re-rendered on every `pyrig update`.
repos:
  - repo: https://github.com/astral-sh/ruff-pre-commit
    rev: v0.8.4
    hooks:
      - id: ruff
        args: [--fix]
      - id: ruff-format
  - repo: https://github.com/pre-commit/pre-commit-hooks
    rev: v5.0.0
    hooks:
      - id: end-of-file-fixer
      - id: trailing-whitespace
      - id: check-yaml
      - id: check-toml
"#;

const RUN_SH: &str = r#"#!/usr/bin/env bash
# Managed by pyrig; re-rendered on every `pyrig update`.
set -euo pipefail

cmd="${1:-help}"

case "$cmd" in
  lint)  ruff check . ;;
  fmt)   ruff format . ;;
  types) mypy . ;;
  test)  pytest ;;
  check) ruff check . && mypy . && pytest ;;
  *)
    echo "usage: ./run.sh {lint|fmt|types|test|check}"
    exit 64
    ;;
esac
"#;

const CI_YML: &str = r#"# Managed by pyrig; re-rendered on every `pyrig update`.
name: CI

on:
  push:
    branches: [main]
  pull_request:

jobs:
  check:
    runs-on: ubuntu-latest
    steps:
      - uses: actions/checkout@v4
      - uses: actions/setup-python@v5
        with:
          python-version: "{{python_version}}"
      - run: pip install ruff mypy pytest
      - run: ruff check .
      - run: mypy .
      - run: pytest
"#;

const DOCKERFILE: &str = r#"FROM python:{{python_version}}-slim

WORKDIR /app

COPY . .
RUN pip install --no-cache-dir .

CMD ["python", "-m", "app"]
"#;

const PYPROJECT_TOML: &str = r#"[project]
name = "my-project"
version = "0.1.0"
requires-python = ">={{python_version}}"

[build-system]
requires = ["setuptools>=68"]
build-backend = "setuptools.build_meta"
"#;

/// Build the manifest pyrig ships with.
///
/// Construction cannot fail at runtime: destinations are static and the
/// unit tests below pin the invariants.
pub fn builtin_manifest() -> Manifest {
    let entries = vec![
        ManifestEntry::new("ruff.toml", RUFF_TOML).expect("static destination"),
        ManifestEntry::new("mypy.ini", MYPY_INI).expect("static destination"),
        ManifestEntry::new("pytest.ini", PYTEST_INI).expect("static destination"),
        ManifestEntry::new(".pre-commit-config.yaml", PRE_COMMIT).expect("static destination"),
        ManifestEntry::new("run.sh", RUN_SH)
            .expect("static destination")
            .executable(),
        ManifestEntry::new(".github/workflows/ci.yml", CI_YML)
            .expect("static destination")
            .when_true("use_github_actions"),
        ManifestEntry::new("Dockerfile", DOCKERFILE)
            .expect("static destination")
            .when_true("use_docker"),
        ManifestEntry::new(MARKER_FILE, PYPROJECT_TOML)
            .expect("static destination")
            .protected(),
    ];

    Manifest::new(entries).expect("builtin manifest destinations are unique")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyrig_core::domain::{ActivationRule, Overrides, ProjectMarker, builtin_schema, resolve};

    #[test]
    fn builtin_manifest_builds() {
        let manifest = builtin_manifest();
        assert_eq!(manifest.len(), 8);
    }

    #[test]
    fn every_payload_renders_against_the_builtin_schema() {
        // The pre-flight guarantee relies on the manifest and schema never
        // drifting apart; this test pins that.
        let params = resolve(&builtin_schema(), &Overrides::new(), ProjectMarker::Fresh).unwrap();
        for entry in builtin_manifest().entries() {
            entry
                .render(&params)
                .unwrap_or_else(|e| panic!("{} failed to render: {e}", entry.destination()));
        }
    }

    #[test]
    fn run_sh_is_the_only_executable() {
        for entry in builtin_manifest().entries() {
            let expected = entry.destination().as_path() == std::path::Path::new("run.sh");
            assert_eq!(entry.is_executable(), expected, "{}", entry.destination());
        }
    }

    #[test]
    fn pyproject_is_the_only_protected_entry() {
        for entry in builtin_manifest().entries() {
            let expected = entry.destination().as_path() == std::path::Path::new(MARKER_FILE);
            assert_eq!(entry.is_protected(), expected, "{}", entry.destination());
        }
    }

    #[test]
    fn conditional_entries_reference_real_parameters() {
        let schema = builtin_schema();
        for entry in builtin_manifest().entries() {
            if let ActivationRule::WhenTrue(param) = entry.activation() {
                assert!(schema.get(param).is_some(), "{param} missing from schema");
            }
        }
    }

    #[test]
    fn ruff_payload_renders_compact_target_version() {
        let params = resolve(&builtin_schema(), &Overrides::new(), ProjectMarker::Fresh).unwrap();
        let manifest = builtin_manifest();
        let entry = &manifest.entries()[0];
        let rendered = entry.render(&params).unwrap();
        assert!(rendered.contains("line-length = 88"));
        assert!(rendered.contains("target-version = \"py312\""));
    }

    #[test]
    fn mypy_payload_tracks_strictness() {
        let strict = resolve(&builtin_schema(), &Overrides::new(), ProjectMarker::Fresh).unwrap();
        let gradual =
            resolve(&builtin_schema(), &Overrides::new(), ProjectMarker::Existing).unwrap();
        let manifest = builtin_manifest();
        let entry = &manifest.entries()[1];
        assert!(entry.render(&strict).unwrap().contains("strict = True"));
        assert!(entry.render(&gradual).unwrap().contains("strict = False"));
    }
}

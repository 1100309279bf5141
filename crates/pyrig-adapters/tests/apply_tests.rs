//! Apply-service behavior against the in-memory filesystem.
//!
//! These tests exercise the full resolve → apply pipeline at the library
//! level: activation, protection, rendering, idempotence, and determinism.

use std::path::Path;

use pyrig_adapters::{MemoryFilesystem, builtin_manifest};
use pyrig_core::{
    application::ApplyService,
    domain::{
        ApplyOutcome, Manifest, ManifestEntry, Overrides, ProjectMarker, builtin_schema, resolve,
    },
    error::PyrigError,
};

const TARGET: &str = "/proj";

fn overrides(pairs: &[(&str, &str)]) -> Overrides {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn apply_defaults(fs: &MemoryFilesystem, marker: ProjectMarker) -> Vec<(String, ApplyOutcome)> {
    apply_with(fs, marker, &Overrides::new())
}

fn apply_with(
    fs: &MemoryFilesystem,
    marker: ProjectMarker,
    overrides: &Overrides,
) -> Vec<(String, ApplyOutcome)> {
    let params = resolve(&builtin_schema(), overrides, marker).unwrap();
    let service = ApplyService::new(Box::new(fs.clone()));
    service
        .apply(&builtin_manifest(), &params, Path::new(TARGET))
        .unwrap()
        .into_iter()
        .map(|r| (r.destination.to_string(), r.outcome))
        .collect()
}

// ── Scenario: fresh project, defaults only ───────────────────────────────────

#[test]
fn fresh_project_defaults_write_expected_files() {
    let fs = MemoryFilesystem::new();
    let results = apply_defaults(&fs, ProjectMarker::Fresh);

    let outcome = |dest: &str| {
        results
            .iter()
            .find(|(d, _)| d == dest)
            .map(|(_, o)| *o)
            .unwrap_or_else(|| panic!("no result for {dest}"))
    };

    assert_eq!(outcome("ruff.toml"), ApplyOutcome::Written);
    assert_eq!(outcome("mypy.ini"), ApplyOutcome::Written);
    assert_eq!(outcome("pytest.ini"), ApplyOutcome::Written);
    assert_eq!(outcome(".pre-commit-config.yaml"), ApplyOutcome::Written);
    assert_eq!(outcome("run.sh"), ApplyOutcome::Written);
    assert_eq!(outcome(".github/workflows/ci.yml"), ApplyOutcome::Written);
    assert_eq!(outcome("Dockerfile"), ApplyOutcome::SkippedInactive);
    assert_eq!(outcome("pyproject.toml"), ApplyOutcome::Written);
}

#[test]
fn inactive_entry_is_never_written() {
    let fs = MemoryFilesystem::new();
    apply_defaults(&fs, ProjectMarker::Fresh);
    assert!(fs.read_file(Path::new("/proj/Dockerfile")).is_none());
}

#[test]
fn docker_override_activates_dockerfile() {
    let fs = MemoryFilesystem::new();
    let results = apply_with(
        &fs,
        ProjectMarker::Fresh,
        &overrides(&[("use_docker", "true")]),
    );
    assert!(results.contains(&("Dockerfile".into(), ApplyOutcome::Written)));
    let dockerfile = fs.read_file(Path::new("/proj/Dockerfile")).unwrap();
    assert!(dockerfile.starts_with("FROM python:3.12-slim"));
}

#[test]
fn disabling_github_actions_skips_workflow() {
    let fs = MemoryFilesystem::new();
    let results = apply_with(
        &fs,
        ProjectMarker::Fresh,
        &overrides(&[("use_github_actions", "false")]),
    );
    assert!(results.contains(&(".github/workflows/ci.yml".into(), ApplyOutcome::SkippedInactive)));
    assert!(fs.read_file(Path::new("/proj/.github/workflows/ci.yml")).is_none());
}

#[test]
fn run_sh_is_marked_executable() {
    let fs = MemoryFilesystem::new();
    apply_defaults(&fs, ProjectMarker::Fresh);
    assert!(fs.is_executable(Path::new("/proj/run.sh")));
    assert!(!fs.is_executable(Path::new("/proj/ruff.toml")));
}

#[test]
fn nested_destination_gets_parent_directories() {
    let fs = MemoryFilesystem::new();
    apply_defaults(&fs, ProjectMarker::Fresh);
    assert!(fs.read_file(Path::new("/proj/.github/workflows/ci.yml")).is_some());
}

// ── Protection ───────────────────────────────────────────────────────────────

#[test]
fn existing_pyproject_is_skipped_and_untouched() {
    let fs = MemoryFilesystem::new();
    let original = "[project]\nname = \"theirs\"\n";
    fs.seed_file("/proj/pyproject.toml", original);

    let results = apply_defaults(&fs, ProjectMarker::Existing);
    assert!(results.contains(&("pyproject.toml".into(), ApplyOutcome::SkippedProtected)));
    assert_eq!(
        fs.read_file(Path::new("/proj/pyproject.toml")).as_deref(),
        Some(original)
    );
}

#[test]
fn protected_entry_is_written_when_absent() {
    let fs = MemoryFilesystem::new();
    let results = apply_defaults(&fs, ProjectMarker::Fresh);
    assert!(results.contains(&("pyproject.toml".into(), ApplyOutcome::Written)));
}

#[test]
fn second_run_never_changes_a_protected_file() {
    let fs = MemoryFilesystem::new();
    apply_defaults(&fs, ProjectMarker::Fresh);

    // Simulate the user taking ownership of the generated pyproject.
    fs.seed_file("/proj/pyproject.toml", "user edits\n");
    let results = apply_defaults(&fs, ProjectMarker::Fresh);

    assert!(results.contains(&("pyproject.toml".into(), ApplyOutcome::SkippedProtected)));
    assert_eq!(
        fs.read_file(Path::new("/proj/pyproject.toml")).as_deref(),
        Some("user edits\n")
    );
}

// ── Idempotence & determinism ────────────────────────────────────────────────

#[test]
fn apply_twice_is_idempotent() {
    let fs = MemoryFilesystem::new();
    apply_defaults(&fs, ProjectMarker::Fresh);
    let first: Vec<_> = fs
        .list_files()
        .into_iter()
        .map(|p| (p.clone(), fs.read_file(&p).unwrap()))
        .collect();

    apply_defaults(&fs, ProjectMarker::Fresh);
    let second: Vec<_> = fs
        .list_files()
        .into_iter()
        .map(|p| (p.clone(), fs.read_file(&p).unwrap()))
        .collect();

    assert_eq!(first, second);
}

#[test]
fn equal_parameter_sets_render_identical_bytes() {
    let fs_a = MemoryFilesystem::new();
    let fs_b = MemoryFilesystem::new();
    apply_defaults(&fs_a, ProjectMarker::Fresh);
    apply_defaults(&fs_b, ProjectMarker::Fresh);

    for path in fs_a.list_files() {
        assert_eq!(fs_a.read_file(&path), fs_b.read_file(&path), "{path:?}");
    }
}

#[test]
fn every_manifest_entry_gets_exactly_one_result() {
    let fs = MemoryFilesystem::new();
    let results = apply_defaults(&fs, ProjectMarker::Fresh);
    let manifest = builtin_manifest();
    assert_eq!(results.len(), manifest.len());
    for entry in manifest.entries() {
        assert_eq!(
            results
                .iter()
                .filter(|(d, _)| *d == entry.destination().to_string())
                .count(),
            1
        );
    }
}

// ── Pre-flight ───────────────────────────────────────────────────────────────

#[test]
fn unresolved_placeholder_aborts_before_any_write() {
    let fs = MemoryFilesystem::new();
    let manifest = Manifest::new(vec![
        ManifestEntry::new("first.txt", "fine\n").unwrap(),
        ManifestEntry::new("broken.txt", "{{no_such_param}}\n").unwrap(),
    ])
    .unwrap();
    let params = resolve(&builtin_schema(), &Overrides::new(), ProjectMarker::Fresh).unwrap();

    let err = ApplyService::new(Box::new(fs.clone()))
        .apply(&manifest, &params, Path::new(TARGET))
        .unwrap_err();

    assert!(matches!(err, PyrigError::Domain(_)));
    assert!(fs.list_files().is_empty(), "pre-flight must precede writes");
}

#[test]
fn placeholder_in_inactive_entry_is_not_preflighted() {
    // An inactive entry's payload never renders, so a mismatch hiding
    // behind a disabled toggle does not block the invocation.
    let fs = MemoryFilesystem::new();
    let manifest = Manifest::new(vec![
        ManifestEntry::new("fine.txt", "ok\n").unwrap(),
        ManifestEntry::new("broken.txt", "{{no_such_param}}\n")
            .unwrap()
            .when_true("use_docker"),
    ])
    .unwrap();
    let params = resolve(&builtin_schema(), &Overrides::new(), ProjectMarker::Fresh).unwrap();

    let results = ApplyService::new(Box::new(fs.clone()))
        .apply(&manifest, &params, Path::new(TARGET))
        .unwrap();

    assert_eq!(results[1].outcome, ApplyOutcome::SkippedInactive);
    assert!(fs.read_file(Path::new("/proj/fine.txt")).is_some());
}

//! Tests for error handling, suggestions, and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn pyrig() -> Command {
    Command::cargo_bin("pyrig").unwrap()
}

#[test]
fn malformed_param_reports_the_expected_shape() {
    let temp = TempDir::new().unwrap();
    pyrig()
        .args([
            "init",
            temp.path().to_str().unwrap(),
            "--defaults",
            "-p",
            "python_version", // no '='
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("KEY=VALUE"));
}

#[test]
fn duplicate_param_is_rejected() {
    let temp = TempDir::new().unwrap();
    pyrig()
        .args([
            "init",
            temp.path().to_str().unwrap(),
            "--defaults",
            "-p",
            "line_length=88",
            "-p",
            "line_length=100",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("more than once"));
}

#[test]
fn rule_violation_explains_the_rule() {
    let temp = TempDir::new().unwrap();
    pyrig()
        .args([
            "init",
            temp.path().to_str().unwrap(),
            "--defaults",
            "-p",
            "line_length=abc",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("an integer between"));
}

#[test]
fn errors_come_with_suggestions() {
    let temp = TempDir::new().unwrap();
    pyrig()
        .args([
            "init",
            temp.path().to_str().unwrap(),
            "--defaults",
            "-p",
            "python_version=2.7",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Suggestions:"));
}

#[test]
fn missing_explicit_config_file_is_a_configuration_error() {
    pyrig()
        .args(["--config", "/definitely/not/here.toml", "params"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn unparsable_config_file_is_a_configuration_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("config.toml");
    std::fs::write(&path, "not [valid toml").unwrap();

    pyrig()
        .args(["--config", path.to_str().unwrap(), "params"])
        .assert()
        .code(4);
}

#[test]
fn config_file_defaults_feed_into_init() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pyrig.toml");
    std::fs::write(&config, "[defaults]\npython_version = \"3.11\"\n").unwrap();
    let target = temp.path().join("proj");

    pyrig()
        .args([
            "--config",
            config.to_str().unwrap(),
            "init",
            target.to_str().unwrap(),
            "--defaults",
        ])
        .assert()
        .success();

    let ruff = std::fs::read_to_string(target.join("ruff.toml")).unwrap();
    assert!(ruff.contains("target-version = \"py311\""));
}

#[test]
fn cli_param_beats_config_file_default() {
    let temp = TempDir::new().unwrap();
    let config = temp.path().join("pyrig.toml");
    std::fs::write(&config, "[defaults]\npython_version = \"3.11\"\n").unwrap();
    let target = temp.path().join("proj");

    pyrig()
        .args([
            "--config",
            config.to_str().unwrap(),
            "init",
            target.to_str().unwrap(),
            "--defaults",
            "-p",
            "python_version=3.13",
        ])
        .assert()
        .success();

    let ruff = std::fs::read_to_string(target.join("ruff.toml")).unwrap();
    assert!(ruff.contains("target-version = \"py313\""));
}

#[test]
fn quiet_and_verbose_together_are_rejected_by_clap() {
    pyrig()
        .args(["--quiet", "--verbose", "params"])
        .assert()
        .code(2);
}

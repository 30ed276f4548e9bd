//! Integration tests for the `crately` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! and error handling — all without requiring a live inventory service.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `crately` binary with env isolation.
///
/// Clears all `CRATELY_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn crately_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("crately");
    cmd.env("HOME", "/tmp/crately-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/crately-cli-test-nonexistent")
        .env_remove("CRATELY_PROFILE")
        .env_remove("CRATELY_SERVICE")
        .env_remove("CRATELY_OUTPUT")
        .env_remove("CRATELY_TIMEOUT");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let output = crately_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    crately_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("inventory")
            .and(predicate::str::contains("items"))
            .and(predicate::str::contains("config"))
            .and(predicate::str::contains("completions")),
    );
}

#[test]
fn test_version_flag() {
    crately_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("crately"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    crately_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    crately_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

#[test]
fn test_completions_fish() {
    crately_cmd()
        .args(["completions", "fish"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let output = crately_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid") || text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_items_list_no_service() {
    // No config and nothing listening on the default port: the command
    // should fail with a connection diagnostic, exit code 7.
    let output = crately_cmd()
        .args(["--base-url", "http://127.0.0.1:59999", "items", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(7), "Expected exit code 7");
    let text = combined_output(&output);
    assert!(
        text.contains("connect") || text.contains("Connection") || text.contains("service"),
        "Expected connection error:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = crately_cmd()
        .args(["--output", "invalid", "items", "list"])
        .output()
        .unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid output format"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("invalid")
            || text.contains("possible values")
            || text.contains("valid value"),
        "Expected error about valid output formats:\n{text}"
    );
}

#[test]
fn test_invalid_base_url() {
    let output = crately_cmd()
        .args(["--base-url", "not a url", "items", "list"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("base-url") || text.contains("invalid URL"),
        "Expected base-url validation error:\n{text}"
    );
}

#[test]
fn test_unknown_profile_is_rejected() {
    let output = crately_cmd()
        .args(["--profile", "missing", "items", "list"])
        .output()
        .unwrap();
    assert!(!output.status.success(), "Expected failure");
    let text = combined_output(&output);
    assert!(
        text.contains("missing") || text.contains("profile"),
        "Expected profile error:\n{text}"
    );
}

// ── Config commands (no service needed) ─────────────────────────────

#[test]
fn test_config_show_no_config() {
    // `config show` uses load_config_or_default() so it succeeds even
    // when no config file exists — it just renders the default config.
    crately_cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("default_profile"));
}

#[test]
fn test_config_path_prints_location() {
    crately_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

// ── Subcommand help discovery ───────────────────────────────────────

#[test]
fn test_items_subcommands_exist() {
    crately_cmd()
        .args(["items", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("list")
                .and(predicate::str::contains("get"))
                .and(predicate::str::contains("add"))
                .and(predicate::str::contains("update"))
                .and(predicate::str::contains("delete")),
        );
}

#[test]
fn test_items_list_flags_exist() {
    crately_cmd()
        .args(["items", "list", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("--search")
                .and(predicate::str::contains("--sort"))
                .and(predicate::str::contains("--order"))
                .and(predicate::str::contains("--page")),
        );
}

#[test]
fn test_config_subcommands_exist() {
    crately_cmd()
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("init")
                .and(predicate::str::contains("show"))
                .and(predicate::str::contains("path")),
        );
}

#[test]
fn test_add_requires_all_fields() {
    let output = crately_cmd()
        .args(["items", "add", "--name", "Bolt"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code");
    let text = combined_output(&output);
    assert!(
        text.contains("--quantity") || text.contains("required"),
        "Expected missing-argument error:\n{text}"
    );
}

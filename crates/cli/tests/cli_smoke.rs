//! CLI smoke tests for hostio.
//!
//! These tests verify that every command runs without panicking and returns
//! the expected exit code and output.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serial_test::serial;
use tempfile::TempDir;

fn hostio_cmd() -> Command {
  cargo_bin_cmd!("hostio")
}

/// A temp directory holding `a.txt`, `b.log` and `nested/c.txt`.
fn temp_tree() -> TempDir {
  let temp = TempDir::new().unwrap();
  std::fs::write(temp.path().join("a.txt"), "a").unwrap();
  std::fs::write(temp.path().join("b.log"), "b").unwrap();
  std::fs::create_dir(temp.path().join("nested")).unwrap();
  std::fs::write(temp.path().join("nested").join("c.txt"), "c").unwrap();
  temp
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_works() {
  hostio_cmd()
    .arg("--help")
    .assert()
    .success()
    .stdout(predicate::str::contains("Usage"));
}

#[test]
fn version_flag_works() {
  hostio_cmd()
    .arg("--version")
    .assert()
    .success()
    .stdout(predicate::str::contains("hostio"));
}

#[test]
fn subcommand_help_works() {
  for cmd in &["info", "env", "path", "ls"] {
    hostio_cmd()
      .arg(cmd)
      .arg("--help")
      .assert()
      .success()
      .stdout(predicate::str::contains("Usage"));
  }
}

// =============================================================================
// Info
// =============================================================================

#[test]
fn info_shows_platform() {
  hostio_cmd()
    .arg("info")
    .assert()
    .success()
    .stdout(predicate::str::contains("Platform"));
}

#[test]
fn info_json_is_parseable() {
  let output = hostio_cmd().args(["info", "--output", "json"]).output().unwrap();
  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert!(json["triple"].is_string());
  assert!(json["path_case_sensitive"].is_boolean());
}

// =============================================================================
// Env
// =============================================================================

#[test]
#[serial]
fn env_prints_single_variable() {
  hostio_cmd()
    .args(["env", "HOSTIO_SMOKE_VAR"])
    .env("HOSTIO_SMOKE_VAR", "smoke-value")
    .assert()
    .success()
    .stdout(predicate::str::contains("smoke-value"));
}

#[test]
#[serial]
fn env_fails_for_missing_variable() {
  hostio_cmd()
    .args(["env", "HOSTIO_SURELY_UNSET"])
    .env_remove("HOSTIO_SURELY_UNSET")
    .assert()
    .failure()
    .stderr(predicate::str::contains("is not set"));
}

#[test]
#[serial]
fn env_json_lists_all_variables() {
  let output = hostio_cmd()
    .args(["env", "--output", "json"])
    .env("HOSTIO_SMOKE_VAR", "listed")
    .output()
    .unwrap();
  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["HOSTIO_SMOKE_VAR"], "listed");
}

// =============================================================================
// Path
// =============================================================================

#[test]
fn path_normalizes_windows_input() {
  let output = hostio_cmd()
    .args(["path", "c:/Users//me/./notes.txt", "--style", "windows", "--output", "json"])
    .output()
    .unwrap();
  assert!(output.status.success());
  let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(json["rendered"], "C:\\Users\\me\\notes.txt");
  assert_eq!(json["root"], "drive C:");
  assert_eq!(json["extension"], "txt");
  assert_eq!(json["relative"], false);
}

#[test]
fn path_collapse_resolves_parent_segments() {
  hostio_cmd()
    .args(["path", "a/b/../c", "--style", "unix", "--collapse"])
    .assert()
    .success()
    .stdout(predicate::str::contains("a/c"));
}

#[test]
fn path_rejects_invalid_input() {
  hostio_cmd()
    .args(["path", "a|b", "--style", "windows"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to parse"));
}

#[test]
fn path_rejects_unknown_style() {
  hostio_cmd().args(["path", "a", "--style", "amiga"]).assert().failure();
}

// =============================================================================
// Ls
// =============================================================================

#[test]
fn ls_lists_files_with_filter() {
  let temp = temp_tree();
  hostio_cmd()
    .args(["ls", "--filter", "*.txt"])
    .arg(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("a.txt"))
    .stdout(predicate::str::contains("b.log").not())
    .stdout(predicate::str::contains("c.txt").not());
}

#[test]
fn ls_recursive_descends() {
  let temp = temp_tree();
  let output = hostio_cmd()
    .args(["ls", "--recursive", "--filter", "*.txt", "--output", "json"])
    .arg(temp.path())
    .output()
    .unwrap();
  assert!(output.status.success());
  let entries: Vec<String> = serde_json::from_slice(&output.stdout).unwrap();
  assert_eq!(entries.len(), 2);
}

#[test]
fn ls_defaults_to_working_directory() {
  let temp = temp_tree();
  hostio_cmd()
    .args(["ls", "--dirs"])
    .current_dir(temp.path())
    .assert()
    .success()
    .stdout(predicate::str::contains("nested"));
}

#[test]
fn ls_fails_for_missing_directory() {
  let temp = TempDir::new().unwrap();
  hostio_cmd()
    .arg("ls")
    .arg(temp.path().join("missing"))
    .assert()
    .failure()
    .stderr(predicate::str::contains("Failed to list"));
}

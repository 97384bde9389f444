//! End-to-end smoke tests for the gamescout binary.

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

fn gamescout() -> Command {
  cargo_bin_cmd!("gamescout")
}

/// Marker file content: fixed header, UTF-16LE relative path, terminator.
fn marker_bytes(relative_path: &str) -> Vec<u8> {
  let mut bytes = vec![0x52, 0x47, 0x42, 0x58, 0x01, 0x00, 0x00, 0x00];
  for unit in relative_path.encode_utf16() {
    bytes.extend_from_slice(&unit.to_le_bytes());
  }
  bytes.extend_from_slice(&[0x00, 0x00]);
  bytes
}

#[test]
fn paths_prints_both_directories() {
  gamescout()
    .arg("paths")
    .assert()
    .success()
    .stdout(predicate::str::contains("Executable dir"))
    .stdout(predicate::str::contains("App data root"));
}

#[test]
fn paths_json_is_well_formed() {
  let output = gamescout().args(["--json", "paths"]).assert().success();

  let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
  let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();

  assert!(value["executable_dir"].is_string());
  assert!(value["local_app_data_root"].is_string());
}

#[test]
fn compare_reports_case_insensitive_equality() {
  gamescout()
    .args(["compare", "Skyrim.esm", "SKYRIM.ESM"])
    .assert()
    .success()
    .stdout(predicate::str::contains("equal"));
}

#[test]
fn compare_reports_ordering() {
  gamescout()
    .args(["compare", "a.esp", "b.esp"])
    .assert()
    .success()
    .stdout(predicate::str::contains("orders before"));
}

#[test]
fn roots_lists_mounted_filesystems() {
  let assert = gamescout().arg("roots").assert().success();

  let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
  assert!(!stdout.trim().is_empty());
}

#[test]
fn redirect_reports_absent_marker() {
  let root = TempDir::new().unwrap();

  gamescout()
    .args(["redirect", root.path().to_str().unwrap()])
    .assert()
    .success()
    .stdout(predicate::str::contains("no redirect marker"));
}

#[test]
fn redirect_decodes_marker_target() {
  let root = TempDir::new().unwrap();
  std::fs::write(root.path().join(".GamingRoot"), marker_bytes("Games")).unwrap();

  gamescout()
    .args(["redirect", root.path().to_str().unwrap()])
    .assert()
    .success()
    .stdout(predicate::str::contains("Games"));
}

#[test]
fn redirect_rejects_odd_length_marker() {
  let root = TempDir::new().unwrap();
  std::fs::write(root.path().join(".GamingRoot"), [0x52, 0x47, 0x42]).unwrap();

  gamescout()
    .args(["redirect", root.path().to_str().unwrap()])
    .assert()
    .failure()
    .stderr(predicate::str::contains("malformed marker file"));
}

#[test]
fn reg_get_rejects_unknown_root_key() {
  gamescout()
    .args(["reg-get", "HKEY_BOGUS", r"Software\Test", "Value"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("invalid input"));
}

#[cfg(not(windows))]
#[test]
fn reg_get_reports_absence_on_registryless_hosts() {
  gamescout()
    .args(["reg-get", "HKEY_LOCAL_MACHINE", r"Software\Test", "Value"])
    .assert()
    .success()
    .stdout(predicate::str::contains("absent"));
}

#[cfg(not(windows))]
#[test]
fn reg_keys_reports_no_children_on_registryless_hosts() {
  gamescout()
    .args(["reg-keys", "HKEY_LOCAL_MACHINE", r"Software\Test"])
    .assert()
    .success()
    .stdout(predicate::str::contains("no child keys"));
}

//! Integration tests for the command-line surface
//!
//! These tests verify argument parsing, fatal configuration errors, and
//! exit codes. They never reach the network: every invocation either fails
//! fast or only prints help.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Helper to create a command isolated from ambient credentials.
fn cmd() -> Command {
    let mut cmd = Command::cargo_bin("aso-keywords").unwrap();
    for var in [
        "ASC_KEY_ID",
        "ASC_ISSUER_ID",
        "ASC_KEY",
        "ASC_KEY_FILE",
        "DEFAULT_COUNTRY",
        "ASO_CHAR_LIMIT",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_help_lists_options() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--locales"))
        .stdout(predicate::str::contains("--platform"))
        .stdout(predicate::str::contains("--key-id"))
        .stdout(predicate::str::contains("--issuer-id"))
        .stdout(predicate::str::contains("--live"));
}

#[test]
fn test_requires_app_arguments() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("APPS"));
}

#[test]
fn test_partial_credentials_fail_before_any_fetch() {
    cmd()
        .args(["id123456789", "--key-id", "KEYID12345"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("credentials are incomplete"))
        .stderr(predicate::str::contains("--issuer-id"));
}

#[test]
fn test_bad_key_material_fails_before_any_fetch() {
    cmd()
        .args([
            "id123456789",
            "--key-id",
            "KEYID12345",
            "--issuer-id",
            "issuer-uuid",
            "--key",
            "garbage",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("private key material"));
}

#[test]
fn test_key_file_is_read_and_validated() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"still not a key").unwrap();

    cmd()
        .args([
            "id123456789",
            "--key-id",
            "KEYID12345",
            "--issuer-id",
            "issuer-uuid",
            "--key-file",
        ])
        .arg(file.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("private key material"));
}

#[test]
fn test_missing_key_file_is_reported() {
    cmd()
        .args([
            "id123456789",
            "--key-id",
            "KEYID12345",
            "--issuer-id",
            "issuer-uuid",
            "--key-file",
            "/nonexistent/AuthKey.p8",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Failed to read key file"));
}

#[test]
fn test_key_and_key_file_conflict() {
    cmd()
        .args([
            "id123456789",
            "--key",
            "material",
            "--key-file",
            "/tmp/AuthKey.p8",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be used with"));
}

#[test]
fn test_rejects_unknown_platform() {
    cmd()
        .args(["id123456789", "--platform", "watchos"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid value"));
}

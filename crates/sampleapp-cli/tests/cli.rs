use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

/// Binary with every outbound target pointed at a closed local port and no
/// user config file in reach.
fn offline_cmd() -> Command {
    let mut cmd = cargo_bin_cmd!("sampleapp");
    cmd.env("XDG_CONFIG_HOME", "/nonexistent/sampleapp-tests")
        .env("SAMPLEAPP_API__BASE_URL", "http://127.0.0.1:1")
        .env("SAMPLEAPP_API__TIMEOUT_SECONDS", "2")
        .env("SAMPLEAPP_DATABASE__HOST", "127.0.0.1")
        .env("SAMPLEAPP_DATABASE__PORT", "1")
        .env("SAMPLEAPP_DATABASE__CONNECT_TIMEOUT_SECONDS", "2")
        .env_remove("SAMPLEAPP_PROFILE")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_version() {
    let mut cmd = cargo_bin_cmd!("sampleapp");
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("sampleapp"));
}

#[test]
fn test_help_lists_flags() {
    let mut cmd = cargo_bin_cmd!("sampleapp");
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--output"))
        .stdout(predicate::str::contains("--profile"))
        .stdout(predicate::str::contains("--config"));
}

#[test]
fn test_no_network_still_completes() {
    offline_cmd()
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting application with compliance issues..."))
        .stdout(predicate::str::contains("API request failed").count(1))
        .stdout(predicate::str::contains("Database connection failed"))
        .stdout(predicate::str::contains("0.0.0.0/0"))
        .stdout(predicate::str::contains("Admin authenticated successfully"))
        .stdout(predicate::str::contains("WARNING: Encryption is disabled!").count(1))
        .stdout(predicate::str::contains(
            "Application started (with security vulnerabilities)",
        ));
}

#[test]
fn test_json_report() {
    let output = offline_cmd()
        .arg("--output")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let json: serde_json::Value =
        serde_json::from_str(&stdout).expect("--output json should produce valid JSON");

    assert_eq!(json["completed"], true);
    assert_eq!(json["profile"], "insecure");
    assert_eq!(json["steps"].as_array().map(Vec::len), Some(6));
    assert_eq!(json["steps"][0]["outcome"]["status"], "failed");
    assert!(!stdout.contains("admin123"), "secrets must be redacted");
    assert!(!stdout.contains("secret-key-hardcoded"), "secrets must be redacted");
}

#[test]
fn test_yaml_report() {
    offline_cmd()
        .arg("--output")
        .arg("yaml")
        .assert()
        .success()
        .stdout(predicate::str::contains("completed: true"));
}

#[test]
fn test_hardened_profile_without_secrets_fails_fast() {
    offline_cmd()
        .arg("--profile")
        .arg("hardened")
        .assert()
        .failure()
        .stderr(predicate::str::contains("hardened profile rejected"))
        .stderr(predicate::str::contains("Tip:"));
}

#[test]
fn test_hardened_profile_with_injected_secrets() {
    offline_cmd()
        .arg("--profile")
        .arg("hardened")
        .env("SAMPLEAPP_API__BASE_URL", "https://127.0.0.1:1")
        .env("SAMPLEAPP_API__TOKEN", "injected-token")
        .env("SAMPLEAPP_DATABASE__PASSWORD", "injected-db-password")
        .env("SAMPLEAPP_SECURITY__ADMIN_PASSWORD", "injected-admin-password")
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample admin credentials rejected"))
        .stdout(predicate::str::contains("encrypted_sensitive information"))
        .stdout(predicate::str::contains("compliance findings").not())
        .stdout(predicate::str::ends_with("Application started\n"));
}

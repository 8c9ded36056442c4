//! CLI integration tests

use std::process::Command;

/// Test that the CLI shows help
#[test]
fn test_cli_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "tw-cli", "--", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI help should succeed");
    assert!(
        stdout.contains("Thermowatch"),
        "Should show app name"
    );
    assert!(stdout.contains("predict"), "Should show predict command");
    assert!(stdout.contains("status"), "Should show status command");
}

/// Test that the CLI shows version
#[test]
fn test_cli_version() {
    let output = Command::new("cargo")
        .args(["run", "-p", "tw-cli", "--", "--version"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "CLI version should succeed");
    assert!(stdout.contains("tw"), "Should show binary name");
}

/// Test predict subcommand help
#[test]
fn test_predict_help() {
    let output = Command::new("cargo")
        .args(["run", "-p", "tw-cli", "--", "predict", "--help"])
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success(), "Predict help should succeed");
    assert!(
        stdout.contains("READINGS"),
        "Should show readings argument"
    );
}

/// Test that predict requires at least one reading
#[test]
fn test_predict_requires_readings() {
    let output = Command::new("cargo")
        .args(["run", "-p", "tw-cli", "--", "predict"])
        .output()
        .expect("Failed to execute command");

    assert!(
        !output.status.success(),
        "Predict without readings should fail"
    );
}

/// Test that non-numeric readings are rejected at argument parsing
#[test]
fn test_predict_rejects_non_numeric_readings() {
    let output = Command::new("cargo")
        .args(["run", "-p", "tw-cli", "--", "predict", "warm"])
        .output()
        .expect("Failed to execute command");

    assert!(
        !output.status.success(),
        "Non-numeric reading should fail to parse"
    );
}

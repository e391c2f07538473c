//! Shared test helpers for integration tests

#![allow(dead_code)]

use assert_cmd::cargo;
use assert_cmd::Command;
use tempfile::TempDir;

/// Helper to get a redress command
pub fn redress() -> Command {
    let mut cmd = Command::new(cargo::cargo_bin!("redress"));
    // Keep the ambient shell identity out of tests
    cmd.env_remove("REDRESS_USER");
    cmd
}

/// Create a project with one admin ("dean") and one student ("sam")
pub fn setup_test_project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    redress()
        .current_dir(tmp.path())
        .args(["init", "--admin", "dean"])
        .assert()
        .success();
    redress()
        .current_dir(tmp.path())
        .args(["user", "add", "sam", "--role", "student"])
        .assert()
        .success();
    tmp
}

/// File a complaint as the given handle, returning its full ID
pub fn submit_complaint(tmp: &TempDir, actor: &str, category: &str, title: &str) -> String {
    let output = redress()
        .current_dir(tmp.path())
        .args([
            "submit",
            "--as",
            actor,
            "--category",
            category,
            "--title",
            title,
            "--description",
            "integration test filing",
            "--no-input",
        ])
        .output()
        .unwrap();

    let stdout = String::from_utf8_lossy(&output.stdout);
    stdout
        .split_whitespace()
        .find(|w| w.starts_with("CMP-"))
        .map(|s| s.to_string())
        .unwrap_or_default()
}

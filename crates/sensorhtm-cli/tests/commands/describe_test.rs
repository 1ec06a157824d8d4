//! Tests for the `describe` command.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn definition_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

/// Test describing a valid model definition.
#[test]
fn test_describe_kitchen_model() {
    let file = definition_file(r#"{"name": "temp_kitchen", "tags": {"component": "Kitchen"}}"#);

    let mut cmd = Command::cargo_bin("sensorhtm").unwrap();
    cmd.arg("describe").arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Kitchen temp HTM Model"))
        .stdout(predicate::str::contains("measurement: temp"))
        .stdout(predicate::str::contains("tag component=Kitchen"));
}

/// Test that a definition without a component is rejected.
#[test]
fn test_describe_missing_component() {
    let file = definition_file(r#"{"name": "power_fridge", "tags": {}}"#);

    let mut cmd = Command::cargo_bin("sensorhtm").unwrap();
    cmd.arg("describe").arg(file.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing field: tags.component"));
}

/// Test that an unreadable file is reported.
#[test]
fn test_describe_missing_file() {
    let mut cmd = Command::cargo_bin("sensorhtm").unwrap();
    cmd.arg("describe").arg("/nonexistent/model.json");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read"));
}

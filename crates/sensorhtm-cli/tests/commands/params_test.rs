//! Tests for the `params` command.

use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

/// Test validating a well-formed parameter file.
#[test]
fn test_params_valid() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"modelParams": {"model": "CLA", "inferenceType": "TemporalAnomaly"}}"#)
        .unwrap();

    let mut cmd = Command::cargo_bin("sensorhtm").unwrap();
    cmd.arg("params").arg(file.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Parameter file OK"))
        .stdout(predicate::str::contains("predicted field: value"))
        .stdout(predicate::str::contains("modelParams.inferenceType"));
}

/// Test that a file without modelParams is rejected.
#[test]
fn test_params_missing_model_params() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(br#"{"model": "CLA"}"#).unwrap();

    let mut cmd = Command::cargo_bin("sensorhtm").unwrap();
    cmd.arg("params").arg(file.path());

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Missing field: modelParams"));
}

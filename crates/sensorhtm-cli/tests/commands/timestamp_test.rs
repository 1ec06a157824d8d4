//! Tests for the `timestamp` command.

use assert_cmd::Command;
use predicates::prelude::*;

/// Test that every suffix form normalizes to the same instant.
#[test]
fn test_timestamp_suffix_forms() {
    let mut cmd = Command::cargo_bin("sensorhtm").unwrap();
    cmd.arg("timestamp")
        .arg("2016-02-16T00:00:00.123456Z")
        .arg("2016-02-16T00:00:00Z")
        .arg("2016-02-16T00:00:00.123456");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("2016-02-16T00:00:00.123456Z -> 2016-02-16T00:00:00"))
        .stdout(predicate::str::contains("2016-02-16T00:00:00Z -> 2016-02-16T00:00:00"))
        .stdout(predicate::str::contains("2016-02-16T00:00:00.123456 -> 2016-02-16T00:00:00"));
}

/// Test that a malformed timestamp fails.
#[test]
fn test_timestamp_invalid() {
    let mut cmd = Command::cargo_bin("sensorhtm").unwrap();
    cmd.arg("timestamp").arg("16/02/2016");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timestamp '16/02/2016'"));
}

/// Test that at least one timestamp is required.
#[test]
fn test_timestamp_requires_argument() {
    let mut cmd = Command::cargo_bin("sensorhtm").unwrap();
    cmd.arg("timestamp");

    cmd.assert().failure().code(2);
}

//! Tests for the `models` and `results` commands.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn sensorhtm(db: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("sensorhtm").unwrap();
    cmd.arg("--db").arg(db);
    cmd
}

/// Test create, list and delete against one store.
#[test]
fn test_models_lifecycle() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("models.redb");

    sensorhtm(&db)
        .args(["models", "create", "-m", "power", "-c", "Mini Fridge", "-s", "local_mini_fridge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created power_local_mini_fridge"));

    sensorhtm(&db)
        .args(["models", "list", "--measurement", "power", "--component", "Mini Fridge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("power_local_mini_fridge\tMini Fridge power HTM Model"));

    sensorhtm(&db)
        .args(["models", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Mini Fridge power HTM Model"));

    sensorhtm(&db)
        .args(["models", "delete", "-m", "power", "-c", "Mini Fridge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted 1 model(s) for power/Mini Fridge"));

    sensorhtm(&db)
        .args(["models", "list"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

/// Test that creating the same model twice fails.
#[test]
fn test_models_create_duplicate() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("models.redb");
    let args = ["models", "create", "-m", "temp", "-c", "Kitchen", "-s", "kitchen"];

    sensorhtm(&db).args(args).assert().success();
    sensorhtm(&db)
        .args(args)
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
}

/// Test that listing by sensor needs both halves of the key.
#[test]
fn test_models_list_requires_component() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("models.redb");

    sensorhtm(&db)
        .args(["models", "list", "--measurement", "power"])
        .assert()
        .failure()
        .code(2);
}

/// Test printing results of a model with no rows, and of an unknown model.
#[test]
fn test_results_command() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("models.redb");

    sensorhtm(&db)
        .args(["models", "create", "-m", "temp", "-c", "Kitchen", "-s", "kitchen"])
        .assert()
        .success();

    sensorhtm(&db)
        .args(["results", "temp_kitchen"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    sensorhtm(&db)
        .args(["results", "temp_missing"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Model not found: temp_missing"));
}

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;

/// Command with every credential source cleared
fn nimbus() -> Command {
    let mut cmd = Command::cargo_bin("nimbus").unwrap();
    for var in [
        "AWS_ACCESS_KEY_ID",
        "AWS_SECRET_ACCESS_KEY",
        "AWS_REGION",
        "AWS_DEFAULT_REGION",
        "NIMBUS_BUCKET",
        "NIMBUS_CONFIG_PATH",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

#[test]
fn test_cli_help() {
    nimbus()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("instances"))
        .stdout(predicate::str::contains("reserved"))
        .stdout(predicate::str::contains("eips"))
        .stdout(predicate::str::contains("interface"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("put"));
}

#[test]
fn test_cli_version() {
    nimbus()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("nimbus"));
}

#[test]
fn test_instances_help() {
    nimbus()
        .arg("instances")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--running"))
        .stdout(predicate::str::contains("--access-key"));
}

#[test]
fn test_get_requires_key_and_path() {
    nimbus()
        .arg("get")
        .arg("only-key")
        .assert()
        .failure()
        .stderr(predicate::str::contains("<PATH>"));
}

#[test]
fn test_missing_access_key() {
    let temp_dir = tempfile::tempdir().unwrap();
    nimbus()
        .current_dir(temp_dir.path())
        .arg("eips")
        .assert()
        .failure()
        .stderr(predicate::str::contains("AWS_ACCESS_KEY_ID"));
}

#[test]
fn test_missing_region() {
    let temp_dir = tempfile::tempdir().unwrap();
    nimbus()
        .current_dir(temp_dir.path())
        .env("AWS_ACCESS_KEY_ID", "AKIATEST")
        .env("AWS_SECRET_ACCESS_KEY", "test-secret")
        .env("HOME", temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .arg("instances")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No region"));
}

#[test]
fn test_bucket_required_for_storage() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("nimbus.yaml"), "region: us-east-1\n").unwrap();
    nimbus()
        .current_dir(temp_dir.path())
        .env("AWS_ACCESS_KEY_ID", "AKIATEST")
        .env("AWS_SECRET_ACCESS_KEY", "test-secret")
        .args(["put", "local.txt", "remote.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No bucket"));
}

#[test]
fn test_default_region_env_is_honoured() {
    let temp_dir = tempfile::tempdir().unwrap();
    nimbus()
        .current_dir(temp_dir.path())
        .env("AWS_ACCESS_KEY_ID", "AKIATEST")
        .env("AWS_SECRET_ACCESS_KEY", "test-secret")
        .env("AWS_DEFAULT_REGION", "eu-central-1")
        .env("HOME", temp_dir.path())
        .env("XDG_CONFIG_HOME", temp_dir.path())
        .args(["get", "remote.txt", "local.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No bucket"))
        .stderr(predicate::str::contains("No region").not());
}

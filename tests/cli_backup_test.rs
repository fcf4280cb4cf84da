//! Integration tests for backup and restore via the CLI.
//!
//! The database is treated as an opaque file: backups are integrity-checked
//! copies, and restore snapshots the current database first.

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_backup_create_requires_database() {
    let env = TestEnv::new();

    env.hw()
        .args(["backup", "create"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("database file not found"));
}

#[test]
fn test_backup_create_and_list() {
    let env = TestEnv::new();
    env.create_project("p");

    env.hw()
        .args(["-H", "backup", "create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created backup backup_"));

    env.hw()
        .args(["backup", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"file_name\":\"backup_"))
        .stdout(predicate::str::contains("\"size_bytes\":"));
}

#[test]
fn test_backup_create_with_name() {
    let env = TestEnv::new();
    env.create_project("p");

    env.hw()
        .args(["backup", "create", "--name", "before refactor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("before_refactor_"));
}

#[test]
fn test_backup_restore_round_trip() {
    let env = TestEnv::new();
    let project_id = env.create_project("keep me");

    let output = env
        .hw()
        .args(["backup", "create"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let file = json["file"].as_str().unwrap().to_string();

    // Destroy the project, then restore the backup
    env.hw()
        .args(["project", "rm", project_id.to_string().as_str()])
        .assert()
        .success();

    env.hw()
        .args(["-H", "backup", "restore", file.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Restored backup"))
        .stdout(predicate::str::contains("before_restore"));

    env.hw()
        .args(["project", "show", project_id.to_string().as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("keep me"));
}

#[test]
fn test_backup_restore_missing_fails() {
    let env = TestEnv::new();
    env.create_project("p");

    env.hw()
        .args(["backup", "restore", "no_such_backup.db"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("backup not found"));
}

#[test]
fn test_backup_rm() {
    let env = TestEnv::new();
    env.create_project("p");

    let output = env
        .hw()
        .args(["backup", "create"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let file = json["file"].as_str().unwrap().to_string();

    env.hw()
        .args(["-H", "backup", "rm", file.as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted backup"));

    env.hw()
        .args(["backup", "rm", file.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("backup not found"));
}

//! Integration tests for project CRUD via the CLI.
//!
//! Verifies that project commands work end to end:
//! - `hw project add/list/show/edit/rm`
//! - JSON and human-readable output formats
//! - Title validation happens before anything is persisted
//! - Listing order follows `updated_date`, most recent first

mod common;

use common::TestEnv;
use predicates::prelude::*;

// === Add Tests ===

#[test]
fn test_project_add_json() {
    let env = TestEnv::new();

    env.hw()
        .args(["project", "add", "My project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"id\":1"))
        .stdout(predicate::str::contains("\"title\":\"My project\""));
}

#[test]
fn test_project_add_human() {
    let env = TestEnv::new();

    env.hw()
        .args(["-H", "project", "add", "My project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created project 1: \"My project\""));
}

#[test]
fn test_project_add_rejects_blank_title() {
    let env = TestEnv::new();

    env.hw()
        .args(["project", "add", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("must not be empty"));
}

#[test]
fn test_project_add_rejects_long_title() {
    let env = TestEnv::new();
    let long_title = "x".repeat(101);

    env.hw()
        .args(["project", "add", long_title.as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("at most 100 characters"));
}

// === List Tests ===

#[test]
fn test_project_list_empty() {
    let env = TestEnv::new();

    env.hw()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"projects\":[]"));

    env.hw()
        .args(["-H", "project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No projects yet"));
}

#[test]
fn test_project_list_includes_progress() {
    let env = TestEnv::new();
    let project_id = env.create_project("Ship v1");
    let task_id = env.create_task(project_id, "only task");

    env.hw()
        .args(["task", "toggle", task_id.to_string().as_str()])
        .assert()
        .success();

    env.hw()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"progress\":100.0"))
        .stdout(predicate::str::contains("\"completed_tasks\":1"))
        .stdout(predicate::str::contains("\"total_tasks\":1"));
}

#[test]
fn test_project_list_orders_by_recent_activity() {
    let env = TestEnv::new();
    let first = env.create_project("first");
    let _second = env.create_project("second");

    // Touching the first project moves it back to the top
    env.hw()
        .args(["project", "edit", first.to_string().as_str(), "--title", "first again"])
        .assert()
        .success();

    let output = env
        .hw()
        .args(["project", "list"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let titles: Vec<&str> = json["projects"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["first again", "second"]);
}

// === Show Tests ===

#[test]
fn test_project_show_aggregates_tasks_and_notes() {
    let env = TestEnv::new();
    let project_id = env.create_project("Ship v1");
    env.create_task(project_id, "write code");
    env.hw()
        .args(["note", "add", project_id.to_string().as_str(), "remember the docs"])
        .assert()
        .success();

    env.hw()
        .args(["project", "show", project_id.to_string().as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\":\"Ship v1\""))
        .stdout(predicate::str::contains("\"total\":1"))
        .stdout(predicate::str::contains("remember the docs"));
}

#[test]
fn test_project_show_missing_fails() {
    let env = TestEnv::new();

    env.hw()
        .args(["project", "show", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// === Edit Tests ===

#[test]
fn test_project_edit_title() {
    let env = TestEnv::new();
    let project_id = env.create_project("draft");

    env.hw()
        .args(["-H", "project", "edit", project_id.to_string().as_str(), "--title", "final"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Updated project 1"));

    env.hw()
        .args(["project", "show", project_id.to_string().as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\":\"final\""));
}

#[test]
fn test_project_edit_missing_fails() {
    let env = TestEnv::new();

    env.hw()
        .args(["project", "edit", "99", "--title", "new"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

// === Rm Tests ===

#[test]
fn test_project_rm_cascades() {
    let env = TestEnv::new();
    let project_id = env.create_project("doomed");
    env.create_task(project_id, "task");
    env.hw()
        .args(["note", "add", project_id.to_string().as_str(), "note"])
        .assert()
        .success();

    env.hw()
        .args(["-H", "project", "rm", project_id.to_string().as_str()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted project 1"));

    env.hw()
        .args(["project", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"projects\":[]"));

    // Children are gone with the parent
    env.hw()
        .args(["task", "list", project_id.to_string().as_str()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_project_rm_missing_fails() {
    let env = TestEnv::new();

    env.hw()
        .args(["project", "rm", "99"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

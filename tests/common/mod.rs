//! Common test utilities for headway integration tests.
//!
//! Provides `TestEnv` for isolated test environments that don't touch the
//! user's real database or config.

#![allow(dead_code)]

use assert_cmd::Command;
use std::path::PathBuf;
pub use tempfile::TempDir;

/// A test environment with an isolated database file.
///
/// The database path is passed per command via the `HW_DB` env var and
/// `XDG_CONFIG_HOME` is pointed into the temp directory, so tests are
/// parallel-safe and immune to any config.kdl on the host.
pub struct TestEnv {
    pub dir: TempDir,
}

impl TestEnv {
    /// Create a new test environment.
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().unwrap(),
        }
    }

    /// Path to this environment's database file.
    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("data").join("headway.db")
    }

    /// Get a Command for the hw binary wired to the isolated database.
    pub fn hw(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_hw"));
        cmd.env("HW_DB", self.db_path());
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"));
        cmd
    }

    /// Create a project and return its id.
    pub fn create_project(&self, title: &str) -> i64 {
        let output = self
            .hw()
            .args(["project", "add", title])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        json["id"].as_i64().unwrap()
    }

    /// Create a task and return its id.
    pub fn create_task(&self, project_id: i64, title: &str) -> i64 {
        let output = self
            .hw()
            .args(["task", "add", project_id.to_string().as_str(), title])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
        json["id"].as_i64().unwrap()
    }
}

impl Default for TestEnv {
    fn default() -> Self {
        Self::new()
    }
}

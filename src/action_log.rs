//! Action logging for Headway commands.
//!
//! Every CLI invocation is appended as one JSON line to `actions.jsonl`
//! next to the database file: what ran, with which arguments, whether it
//! succeeded, and how long it took. Logging must never break a command,
//! so every failure path here degrades to a warning on stderr.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// A single action log entry.
#[derive(Debug, Serialize, Deserialize)]
pub struct ActionLog {
    /// When the action occurred
    pub timestamp: DateTime<Utc>,

    /// Database the command ran against
    pub database: String,

    /// Command name (e.g. "task add", "backup restore")
    pub command: String,

    /// Command arguments as JSON
    pub args: serde_json::Value,

    /// Whether the command succeeded
    pub success: bool,

    /// Error message if the command failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Command execution duration in milliseconds
    pub duration_ms: u64,

    /// User who executed the command
    pub user: String,
}

/// Append an action to the log file next to the database.
///
/// Errors are reported on stderr and otherwise swallowed; callers treat
/// this as fire-and-forget.
pub fn log_action(
    db_path: &Path,
    command: &str,
    args: serde_json::Value,
    success: bool,
    error: Option<String>,
    duration_ms: u64,
) {
    let entry = ActionLog {
        timestamp: Utc::now(),
        database: db_path.to_string_lossy().to_string(),
        command: command.to_string(),
        args,
        success,
        error,
        duration_ms,
        user: current_user(),
    };

    if let Err(e) = write_log_entry(&log_path(db_path), &entry) {
        eprintln!("Warning: failed to write action log: {e}");
    }
}

/// Log file location for a given database file.
pub fn log_path(db_path: &Path) -> PathBuf {
    db_path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .join("actions.jsonl")
}

fn write_log_entry(path: &Path, entry: &ActionLog) -> std::io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    let json = serde_json::to_string(entry)?;
    writeln!(file, "{json}")
}

fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

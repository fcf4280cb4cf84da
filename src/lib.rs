//! Headway - a project progress tracking library.
//!
//! This library provides the core functionality for the `hw` CLI tool:
//! project/task/note persistence, completion progress math, due-date
//! status classification, and manual task reordering.

pub mod action_log;
pub mod backup;
pub mod cli;
pub mod commands;
pub mod config;
pub mod models;
pub mod progress;
pub mod reorder;
pub mod status;
pub mod storage;


/// Library-level error type for Headway operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Backup error: {0}")]
    Backup(String),
}

/// Result type alias for Headway operations.
pub type Result<T> = std::result::Result<T, Error>;

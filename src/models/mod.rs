//! Data models for Headway entities.
//!
//! This module defines the core data structures:
//! - `Project` - Top-level container for tasks and notes
//! - `Task` - Checkable work item with manual ordering and an optional due date
//! - `Note` - Free-form text attached to a project
//!
//! Each `new()` constructor stamps creation-time defaults. Hydrating an
//! entity from storage goes through the store's row mapping instead, which
//! preserves stored timestamps exactly - a hydrated value is never re-stamped.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Maximum length of a project title, enforced by [`validate_project_title`].
pub const MAX_PROJECT_TITLE_LEN: usize = 100;

/// Maximum length of a task title, enforced by [`validate_task_title`].
pub const MAX_TASK_TITLE_LEN: usize = 200;

/// A project tracked by Headway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Surrogate key assigned by the store; `None` before persistence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Project title
    pub title: String,

    /// Detailed description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Creation timestamp, immutable after creation
    pub created_date: DateTime<Utc>,

    /// Refreshed on every update, including indirect touches from task
    /// reordering
    pub updated_date: DateTime<Utc>,
}

impl Project {
    /// Create a fresh, never-persisted project.
    ///
    /// Both timestamps are stamped to now: a newly constructed project is
    /// considered "just touched" until the store says otherwise.
    pub fn new(title: String, description: Option<String>) -> Self {
        let now = Utc::now();
        Self {
            id: None,
            title,
            description,
            created_date: now,
            updated_date: now,
        }
    }
}

/// A checkable work item within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Surrogate key assigned by the store; `None` before persistence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Owning project
    pub project_id: i64,

    /// Task title
    pub title: String,

    /// Detailed description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Completion flag
    #[serde(default)]
    pub completed: bool,

    /// Manual display order within the project. Assigned by the store at
    /// creation (max sibling order + 1); mutated only through the reorder
    /// protocol. Values need not be contiguous.
    #[serde(default)]
    pub order_index: i64,

    /// Creation timestamp, immutable after creation
    pub created_date: DateTime<Utc>,

    /// Set the instant completion is toggled on, cleared when toggled off
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_date: Option<DateTime<Utc>>,

    /// Optional due date, independently settable and clearable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Create a fresh task for the given project.
    ///
    /// `order_index` starts at 0; the store overwrites it at insertion
    /// with the next free slot in the project.
    pub fn new(project_id: i64, title: String) -> Self {
        Self {
            id: None,
            project_id,
            title,
            description: None,
            completed: false,
            order_index: 0,
            created_date: Utc::now(),
            completed_date: None,
            due_date: None,
        }
    }
}

/// A free-form note attached to a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Note {
    /// Surrogate key assigned by the store; `None` before persistence
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Owning project
    pub project_id: i64,

    /// Note content
    pub content: String,

    /// Creation timestamp, immutable after creation
    pub created_date: DateTime<Utc>,
}

impl Note {
    /// Create a fresh note for the given project.
    pub fn new(project_id: i64, content: String) -> Self {
        Self {
            id: None,
            project_id,
            content,
            created_date: Utc::now(),
        }
    }
}

/// Validate a project title: non-empty after trimming, at most 100 chars.
///
/// Callers run this before handing a project to the store; the store does
/// not re-validate.
pub fn validate_project_title(title: &str) -> Result<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "project title must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_PROJECT_TITLE_LEN {
        return Err(Error::InvalidInput(format!(
            "project title must be at most {} characters",
            MAX_PROJECT_TITLE_LEN
        )));
    }
    Ok(())
}

/// Validate a task title: non-empty after trimming, at most 200 chars.
pub fn validate_task_title(title: &str) -> Result<()> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(Error::InvalidInput(
            "task title must not be empty".to_string(),
        ));
    }
    if trimmed.chars().count() > MAX_TASK_TITLE_LEN {
        return Err(Error::InvalidInput(format!(
            "task title must be at most {} characters",
            MAX_TASK_TITLE_LEN
        )));
    }
    Ok(())
}

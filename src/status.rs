//! Due-date urgency classification for tasks and projects.
//!
//! Pure functions: the only inputs are the entity and an explicit `now`,
//! so classification is reproducible in tests. Each task or project has
//! exactly one status - the checks short-circuit in priority order.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Task;

/// Classified status of a task or project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Overdue,
    Urgent,
    Completed,
    HighProgress,
    Normal,
}

impl Status {
    /// Total ordering across statuses; lower wins when several statuses
    /// are reduced to one representative.
    pub fn priority(&self) -> u8 {
        match self {
            Status::Overdue => 0,
            Status::Urgent => 1,
            Status::Completed => 2,
            Status::HighProgress => 3,
            Status::Normal => 4,
        }
    }

    /// Fixed icon glyph shown next to the entity.
    pub fn icon(&self) -> &'static str {
        match self {
            Status::Urgent => "\u{1F6A8}",
            Status::Overdue => "\u{26A0}\u{FE0F}",
            Status::Completed => "\u{2705}",
            Status::HighProgress => "\u{1F3C6}",
            Status::Normal => "",
        }
    }

    /// Fixed color used by rendering collaborators.
    pub fn color(&self) -> &'static str {
        match self {
            Status::Urgent => "#ff6b6b",
            Status::Overdue => "#ff4757",
            Status::Completed => "#2ed573",
            Status::HighProgress => "#ffa502",
            Status::Normal => "#ddd",
        }
    }

    /// Short human description.
    pub fn description(&self) -> &'static str {
        match self {
            Status::Urgent => "due within 24 hours",
            Status::Overdue => "past due",
            Status::Completed => "completed",
            Status::HighProgress => "excellent progress",
            Status::Normal => "normal",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Urgent => "urgent",
            Status::Overdue => "overdue",
            Status::Completed => "completed",
            Status::HighProgress => "high_progress",
            Status::Normal => "normal",
        }
    }
}

/// Classify a single task. First match wins:
/// completed, then overdue, then urgent (due within 24h), then normal.
pub fn task_status(task: &Task, now: DateTime<Utc>) -> Status {
    if task.completed {
        return Status::Completed;
    }

    if let Some(due) = task.due_date {
        if due < now {
            return Status::Overdue;
        }
        if due < now + Duration::hours(24) {
            return Status::Urgent;
        }
    }

    Status::Normal
}

/// Classify a project from its task list. First match wins: empty list is
/// normal, completion >= 80% is high progress (even with urgent or overdue
/// stragglers), then any urgent task, then any overdue task.
pub fn project_status(tasks: &[Task], now: DateTime<Utc>) -> Status {
    if tasks.is_empty() {
        return Status::Normal;
    }

    if completion_rate(tasks) >= 0.8 {
        return Status::HighProgress;
    }

    if tasks.iter().any(|t| task_status(t, now) == Status::Urgent) {
        return Status::Urgent;
    }

    if tasks.iter().any(|t| task_status(t, now) == Status::Overdue) {
        return Status::Overdue;
    }

    Status::Normal
}

/// Reduce several statuses to the highest-priority one. Empty input is
/// normal.
pub fn pick_highest_priority(statuses: &[Status]) -> Status {
    statuses
        .iter()
        .copied()
        .min_by_key(Status::priority)
        .unwrap_or(Status::Normal)
}

/// Whether the task is due within the next `hours` hours (and not yet
/// past due).
pub fn is_due_soon(task: &Task, now: DateTime<Utc>, hours: i64) -> bool {
    match task.due_date {
        Some(due) => now <= due && due < now + Duration::hours(hours),
        None => false,
    }
}

/// Whether the task's due date has passed.
pub fn is_overdue(task: &Task, now: DateTime<Utc>) -> bool {
    match task.due_date {
        Some(due) => due < now,
        None => false,
    }
}

/// Completed fraction of the task list, in `[0.0, 1.0]`. Empty is 0.0.
pub fn completion_rate(tasks: &[Task]) -> f64 {
    if tasks.is_empty() {
        return 0.0;
    }
    tasks.iter().filter(|t| t.completed).count() as f64 / tasks.len() as f64
}

/// Status of a single task plus its fixed presentation attributes.
#[derive(Debug, Clone, Serialize)]
pub struct TaskStatusReport {
    pub status: Status,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub priority: u8,
}

/// Classify a task and bundle the presentation attributes.
pub fn task_status_report(task: &Task, now: DateTime<Utc>) -> TaskStatusReport {
    let status = task_status(task, now);
    TaskStatusReport {
        status,
        icon: status.icon(),
        color: status.color(),
        description: status.description(),
        priority: status.priority(),
    }
}

/// Per-status task counts within a project.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StatusCounts {
    pub urgent: usize,
    pub overdue: usize,
    pub completed: usize,
    pub high_progress: usize,
    pub normal: usize,
}

/// Project status plus per-status counts and convenience counters.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectStatusReport {
    pub status: Status,
    pub icon: &'static str,
    pub color: &'static str,
    pub description: &'static str,
    pub priority: u8,
    pub task_counts: StatusCounts,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub urgent_tasks: usize,
    pub overdue_tasks: usize,
}

/// Classify a project and tally its tasks by individual status.
pub fn project_status_report(tasks: &[Task], now: DateTime<Utc>) -> ProjectStatusReport {
    let status = project_status(tasks, now);

    let mut counts = StatusCounts::default();
    for task in tasks {
        match task_status(task, now) {
            Status::Urgent => counts.urgent += 1,
            Status::Overdue => counts.overdue += 1,
            Status::Completed => counts.completed += 1,
            Status::HighProgress => counts.high_progress += 1,
            Status::Normal => counts.normal += 1,
        }
    }

    ProjectStatusReport {
        status,
        icon: status.icon(),
        color: status.color(),
        description: status.description(),
        priority: status.priority(),
        completed_tasks: counts.completed,
        urgent_tasks: counts.urgent,
        overdue_tasks: counts.overdue,
        total_tasks: tasks.len(),
        task_counts: counts,
    }
}

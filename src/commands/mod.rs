//! Command implementations for the Headway CLI.
//!
//! This layer owns everything the core deliberately does not: title
//! validation before anything reaches the store, due-date input parsing,
//! raising `NotFound` for ids the store reports as absent, and rendering
//! results as JSON or human-readable text.
//!
//! Each command returns a typed result implementing [`Output`]; `main`
//! picks the representation.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

use crate::backup::{BackupInfo, BackupManager};
use crate::config::ResolvedConfig;
use crate::models::{
    Note, Project, Task, validate_project_title, validate_task_title,
};
use crate::progress::{CompletionStats, completion_stats};
use crate::reorder;
use crate::status::{ProjectStatusReport, Status, project_status_report, task_status};
use crate::storage::{Store, parse_timestamp_str};
use crate::{Error, Result};

/// Command results that can be serialized to JSON or formatted for humans.
pub trait Output: Serialize {
    /// Format for human-readable output.
    fn to_human(&self) -> String;

    /// Serialize to a JSON string.
    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| String::from("{}"))
    }
}

/// A task plus its classification, as rendered in listings.
#[derive(Debug, Serialize)]
pub struct TaskRow {
    #[serde(flatten)]
    pub task: Task,
    pub status: Status,
    pub icon: &'static str,
}

impl TaskRow {
    fn new(task: Task, now: DateTime<Utc>) -> Self {
        let status = task_status(&task, now);
        Self {
            task,
            status,
            icon: status.icon(),
        }
    }
}

fn task_rows(tasks: Vec<Task>, now: DateTime<Utc>) -> Vec<TaskRow> {
    tasks.into_iter().map(|t| TaskRow::new(t, now)).collect()
}

fn render_task_line(row: &TaskRow, position: usize) -> String {
    let check = if row.task.completed { "x" } else { " " };
    let mut line = format!("  {}. [{}] {}", position, check, row.task.title);
    if let Some(due) = row.task.due_date {
        line.push_str(&format!(" (due {})", format_datetime(&due)));
    }
    if !row.icon.is_empty() {
        line.push_str(&format!(" {}", row.icon));
    }
    line
}

// === Project Commands ===

#[derive(Debug, Serialize)]
pub struct ProjectAdded {
    pub id: i64,
    pub title: String,
}

impl Output for ProjectAdded {
    fn to_human(&self) -> String {
        format!("Created project {}: \"{}\"", self.id, self.title)
    }
}

pub fn project_add(store: &Store, title: &str, description: Option<String>) -> Result<ProjectAdded> {
    validate_project_title(title)?;

    let project = Project::new(title.trim().to_string(), description);
    let id = store.create_project(&project)?;

    Ok(ProjectAdded {
        id,
        title: project.title,
    })
}

/// One line of `hw project list`.
#[derive(Debug, Serialize)]
pub struct ProjectSummary {
    pub id: i64,
    pub title: String,
    pub status: Status,
    pub icon: &'static str,
    pub progress: f64,
    pub progress_text: &'static str,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub updated_date: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ProjectList {
    pub projects: Vec<ProjectSummary>,
}

impl Output for ProjectList {
    fn to_human(&self) -> String {
        if self.projects.is_empty() {
            return "No projects yet. Create one with `hw project add <title>`.".to_string();
        }

        let now = Utc::now();
        let mut lines = vec!["Projects:".to_string()];
        for p in &self.projects {
            let icon = if p.icon.is_empty() {
                String::new()
            } else {
                format!("{} ", p.icon)
            };
            lines.push(format!(
                "  [{}] {}{} - {:.0}% ({}), {}/{} tasks, updated {}",
                p.id,
                icon,
                p.title,
                p.progress,
                p.progress_text,
                p.completed_tasks,
                p.total_tasks,
                format_relative(&p.updated_date, now),
            ));
        }
        lines.join("\n")
    }
}

pub fn project_list(store: &Store) -> Result<ProjectList> {
    let now = Utc::now();
    let mut projects = Vec::new();

    for project in store.get_all_projects()? {
        let Some(id) = project.id else { continue };
        let tasks = store.get_tasks_by_project(id)?;
        let stats = completion_stats(&tasks);
        let status = crate::status::project_status(&tasks, now);

        projects.push(ProjectSummary {
            id,
            title: project.title,
            status,
            icon: status.icon(),
            progress: stats.progress,
            progress_text: stats.progress_text,
            total_tasks: stats.total,
            completed_tasks: stats.completed,
            updated_date: project.updated_date,
        });
    }

    Ok(ProjectList { projects })
}

#[derive(Debug, Serialize)]
pub struct ProjectShow {
    pub project: Project,
    pub stats: CompletionStats,
    pub status: ProjectStatusReport,
    pub tasks: Vec<TaskRow>,
    pub notes: Vec<Note>,
}

impl Output for ProjectShow {
    fn to_human(&self) -> String {
        let now = Utc::now();
        let mut lines = Vec::new();

        let icon = if self.status.icon.is_empty() {
            String::new()
        } else {
            format!("{} ", self.status.icon)
        };
        lines.push(format!(
            "{}{} [{}]",
            icon,
            self.project.title,
            self.project.id.unwrap_or_default()
        ));
        if let Some(desc) = &self.project.description {
            lines.push(format!("  {desc}"));
        }
        lines.push(format!(
            "  {:.0}% ({}) - {} of {} tasks done, {} remaining",
            self.stats.progress,
            self.stats.progress_text,
            self.stats.completed,
            self.stats.total,
            self.stats.remaining,
        ));
        lines.push(format!(
            "  created {}, updated {}",
            format_datetime(&self.project.created_date),
            format_relative(&self.project.updated_date, now),
        ));

        if !self.tasks.is_empty() {
            lines.push("Tasks:".to_string());
            for (position, row) in self.tasks.iter().enumerate() {
                lines.push(render_task_line(row, position));
            }
        }

        if !self.notes.is_empty() {
            lines.push("Notes:".to_string());
            for note in &self.notes {
                lines.push(format!(
                    "  [{}] {} {}",
                    note.id.unwrap_or_default(),
                    format_datetime(&note.created_date),
                    truncate_text(&note.content, 50),
                ));
            }
        }

        lines.join("\n")
    }
}

pub fn project_show(store: &Store, id: i64) -> Result<ProjectShow> {
    let project = store
        .get_project(id)?
        .ok_or_else(|| Error::NotFound(format!("project {id}")))?;

    let now = Utc::now();
    let tasks = store.get_tasks_by_project(id)?;
    let notes = store.get_notes_by_project(id)?;

    Ok(ProjectShow {
        stats: completion_stats(&tasks),
        status: project_status_report(&tasks, now),
        tasks: task_rows(tasks, now),
        notes,
        project,
    })
}

#[derive(Debug, Serialize)]
pub struct ProjectEdited {
    pub id: i64,
}

impl Output for ProjectEdited {
    fn to_human(&self) -> String {
        format!("Updated project {}", self.id)
    }
}

pub fn project_edit(
    store: &Store,
    id: i64,
    title: Option<String>,
    description: Option<String>,
) -> Result<ProjectEdited> {
    // Fetch current, build the modified copy, submit - no in-place aliasing
    let mut project = store
        .get_project(id)?
        .ok_or_else(|| Error::NotFound(format!("project {id}")))?;

    if let Some(title) = title {
        validate_project_title(&title)?;
        project.title = title.trim().to_string();
    }
    if let Some(description) = description {
        project.description = Some(description);
    }

    store.update_project(&project)?;
    Ok(ProjectEdited { id })
}

#[derive(Debug, Serialize)]
pub struct ProjectRemoved {
    pub id: i64,
}

impl Output for ProjectRemoved {
    fn to_human(&self) -> String {
        format!("Deleted project {}", self.id)
    }
}

pub fn project_rm(store: &Store, id: i64) -> Result<ProjectRemoved> {
    if !store.delete_project(id)? {
        return Err(Error::NotFound(format!("project {id}")));
    }
    Ok(ProjectRemoved { id })
}

// === Task Commands ===

#[derive(Debug, Serialize)]
pub struct TaskAdded {
    pub id: i64,
    pub project_id: i64,
    pub title: String,
    pub order_index: i64,
}

impl Output for TaskAdded {
    fn to_human(&self) -> String {
        format!(
            "Created task {}: \"{}\" (position {})",
            self.id, self.title, self.order_index
        )
    }
}

pub fn task_add(
    store: &Store,
    project_id: i64,
    title: &str,
    description: Option<String>,
    due: Option<String>,
) -> Result<TaskAdded> {
    validate_task_title(title)?;
    store
        .get_project(project_id)?
        .ok_or_else(|| Error::NotFound(format!("project {project_id}")))?;

    let mut task = Task::new(project_id, title.trim().to_string());
    task.description = description;
    task.due_date = due.as_deref().map(parse_due_date).transpose()?;

    let id = store.create_task(&task)?;
    // Reload for the assigned order_index
    let created = store
        .get_task(id)?
        .ok_or_else(|| Error::NotFound(format!("task {id}")))?;

    Ok(TaskAdded {
        id,
        project_id,
        title: created.title,
        order_index: created.order_index,
    })
}

#[derive(Debug, Serialize)]
pub struct TaskList {
    pub project_id: i64,
    pub tasks: Vec<TaskRow>,
}

impl Output for TaskList {
    fn to_human(&self) -> String {
        if self.tasks.is_empty() {
            return format!("No tasks in project {}.", self.project_id);
        }
        let mut lines = vec![format!("Tasks in project {}:", self.project_id)];
        for (position, row) in self.tasks.iter().enumerate() {
            lines.push(render_task_line(row, position));
        }
        lines.join("\n")
    }
}

pub fn task_list(store: &Store, project_id: i64) -> Result<TaskList> {
    store
        .get_project(project_id)?
        .ok_or_else(|| Error::NotFound(format!("project {project_id}")))?;

    let tasks = store.get_tasks_by_project(project_id)?;
    Ok(TaskList {
        project_id,
        tasks: task_rows(tasks, Utc::now()),
    })
}

#[derive(Debug, Serialize)]
pub struct TaskEdited {
    pub id: i64,
}

impl Output for TaskEdited {
    fn to_human(&self) -> String {
        format!("Updated task {}", self.id)
    }
}

pub fn task_edit(
    store: &Store,
    id: i64,
    title: Option<String>,
    description: Option<String>,
) -> Result<TaskEdited> {
    let mut task = store
        .get_task(id)?
        .ok_or_else(|| Error::NotFound(format!("task {id}")))?;

    if let Some(title) = title {
        validate_task_title(&title)?;
        task.title = title.trim().to_string();
    }
    if let Some(description) = description {
        task.description = Some(description);
    }

    store.update_task(&task)?;
    Ok(TaskEdited { id })
}

#[derive(Debug, Serialize)]
pub struct TaskToggled {
    pub id: i64,
    pub completed: bool,
}

impl Output for TaskToggled {
    fn to_human(&self) -> String {
        if self.completed {
            format!("Task {} marked complete", self.id)
        } else {
            format!("Task {} marked incomplete", self.id)
        }
    }
}

pub fn task_toggle(store: &Store, id: i64) -> Result<TaskToggled> {
    let completed = store
        .toggle_task_completion(id)?
        .ok_or_else(|| Error::NotFound(format!("task {id}")))?;
    Ok(TaskToggled { id, completed })
}

#[derive(Debug, Serialize)]
pub struct TaskDueChanged {
    pub id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
}

impl Output for TaskDueChanged {
    fn to_human(&self) -> String {
        match &self.due_date {
            Some(due) => format!("Set due date for task {}: {}", self.id, format_datetime(due)),
            None => format!("Cleared due date for task {}", self.id),
        }
    }
}

pub fn task_due(
    store: &Store,
    id: i64,
    when: Option<String>,
    clear: bool,
) -> Result<TaskDueChanged> {
    let mut task = store
        .get_task(id)?
        .ok_or_else(|| Error::NotFound(format!("task {id}")))?;

    task.due_date = if clear {
        None
    } else {
        let when = when.ok_or_else(|| {
            Error::InvalidInput("provide a due date or --clear".to_string())
        })?;
        Some(parse_due_date(&when)?)
    };

    store.update_task(&task)?;
    Ok(TaskDueChanged {
        id,
        due_date: task.due_date,
    })
}

#[derive(Debug, Serialize)]
pub struct TaskMoved {
    pub project_id: i64,
    pub from: usize,
    pub to: usize,
    pub changed: usize,
    pub tasks: Vec<TaskRow>,
}

impl Output for TaskMoved {
    fn to_human(&self) -> String {
        let mut lines = vec![format!(
            "Moved task from position {} to {} ({} rows renumbered)",
            self.from, self.to, self.changed
        )];
        for (position, row) in self.tasks.iter().enumerate() {
            lines.push(render_task_line(row, position));
        }
        lines.join("\n")
    }
}

pub fn task_move(
    store: &mut Store,
    project_id: i64,
    from: usize,
    to: usize,
) -> Result<TaskMoved> {
    store
        .get_project(project_id)?
        .ok_or_else(|| Error::NotFound(format!("project {project_id}")))?;

    let changed = reorder::move_task(store, project_id, from, to)?;

    // Indices may have shifted for every visible task; reload
    let tasks = store.get_tasks_by_project(project_id)?;
    Ok(TaskMoved {
        project_id,
        from,
        to,
        changed,
        tasks: task_rows(tasks, Utc::now()),
    })
}

#[derive(Debug, Serialize)]
pub struct TaskRemoved {
    pub id: i64,
}

impl Output for TaskRemoved {
    fn to_human(&self) -> String {
        format!("Deleted task {}", self.id)
    }
}

pub fn task_rm(store: &Store, id: i64) -> Result<TaskRemoved> {
    if !store.delete_task(id)? {
        return Err(Error::NotFound(format!("task {id}")));
    }
    Ok(TaskRemoved { id })
}

// === Note Commands ===

#[derive(Debug, Serialize)]
pub struct NoteAdded {
    pub id: i64,
    pub project_id: i64,
}

impl Output for NoteAdded {
    fn to_human(&self) -> String {
        format!("Created note {}", self.id)
    }
}

pub fn note_add(store: &Store, project_id: i64, content: &str) -> Result<NoteAdded> {
    store
        .get_project(project_id)?
        .ok_or_else(|| Error::NotFound(format!("project {project_id}")))?;

    let id = store.create_note(&Note::new(project_id, content.to_string()))?;
    Ok(NoteAdded { id, project_id })
}

#[derive(Debug, Serialize)]
pub struct NoteList {
    pub project_id: i64,
    pub notes: Vec<Note>,
}

impl Output for NoteList {
    fn to_human(&self) -> String {
        if self.notes.is_empty() {
            return format!("No notes in project {}.", self.project_id);
        }
        let mut lines = vec![format!("Notes in project {}:", self.project_id)];
        for note in &self.notes {
            lines.push(format!(
                "  [{}] {} {}",
                note.id.unwrap_or_default(),
                format_datetime(&note.created_date),
                truncate_text(&note.content, 50),
            ));
        }
        lines.join("\n")
    }
}

pub fn note_list(store: &Store, project_id: i64) -> Result<NoteList> {
    store
        .get_project(project_id)?
        .ok_or_else(|| Error::NotFound(format!("project {project_id}")))?;

    Ok(NoteList {
        project_id,
        notes: store.get_notes_by_project(project_id)?,
    })
}

#[derive(Debug, Serialize)]
pub struct NoteEdited {
    pub id: i64,
}

impl Output for NoteEdited {
    fn to_human(&self) -> String {
        format!("Updated note {}", self.id)
    }
}

pub fn note_edit(store: &Store, id: i64, content: &str) -> Result<NoteEdited> {
    let mut note = store
        .get_note(id)?
        .ok_or_else(|| Error::NotFound(format!("note {id}")))?;

    note.content = content.to_string();
    store.update_note(&note)?;
    Ok(NoteEdited { id })
}

#[derive(Debug, Serialize)]
pub struct NoteRemoved {
    pub id: i64,
}

impl Output for NoteRemoved {
    fn to_human(&self) -> String {
        format!("Deleted note {}", self.id)
    }
}

pub fn note_rm(store: &Store, id: i64) -> Result<NoteRemoved> {
    if !store.delete_note(id)? {
        return Err(Error::NotFound(format!("note {id}")));
    }
    Ok(NoteRemoved { id })
}

// === Backup Commands ===
//
// Backups treat the database as an opaque file, so these never open the
// store; the connection must not be live while the file is replaced.

#[derive(Debug, Serialize)]
pub struct BackupCreated {
    pub file: String,
    pub size: String,
}

impl Output for BackupCreated {
    fn to_human(&self) -> String {
        format!("Created backup {} ({})", self.file, self.size)
    }
}

pub fn backup_create(db_path: &Path, name: Option<String>) -> Result<BackupCreated> {
    let manager = BackupManager::new(db_path)?;
    let path = manager.create_backup(name.as_deref())?;

    let size = std::fs::metadata(&path).map(|m| m.len()).unwrap_or(0);
    Ok(BackupCreated {
        file: path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
        size: crate::backup::format_file_size(size),
    })
}

#[derive(Debug, Serialize)]
pub struct BackupList {
    pub backups: Vec<BackupInfo>,
}

impl Output for BackupList {
    fn to_human(&self) -> String {
        if self.backups.is_empty() {
            return "No backups yet. Create one with `hw backup create`.".to_string();
        }
        let mut lines = vec!["Backups:".to_string()];
        for b in &self.backups {
            lines.push(format!(
                "  {} {} ({})",
                format_datetime(&b.created),
                b.file_name,
                b.size,
            ));
        }
        lines.join("\n")
    }
}

pub fn backup_list(db_path: &Path) -> Result<BackupList> {
    let manager = BackupManager::new(db_path)?;
    Ok(BackupList {
        backups: manager.list_backups()?,
    })
}

#[derive(Debug, Serialize)]
pub struct BackupRestored {
    pub file: String,
    pub snapshot: String,
}

impl Output for BackupRestored {
    fn to_human(&self) -> String {
        format!(
            "Restored backup {} (previous database saved as {})",
            self.file, self.snapshot
        )
    }
}

pub fn backup_restore(db_path: &Path, file: &str) -> Result<BackupRestored> {
    let manager = BackupManager::new(db_path)?;
    let snapshot = manager.restore_backup(file)?;

    Ok(BackupRestored {
        file: file.to_string(),
        snapshot: snapshot
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
    })
}

#[derive(Debug, Serialize)]
pub struct BackupRemoved {
    pub file: String,
}

impl Output for BackupRemoved {
    fn to_human(&self) -> String {
        format!("Deleted backup {}", self.file)
    }
}

pub fn backup_rm(db_path: &Path, file: &str) -> Result<BackupRemoved> {
    let manager = BackupManager::new(db_path)?;
    manager.delete_backup(file)?;
    Ok(BackupRemoved {
        file: file.to_string(),
    })
}

// === System Commands ===

#[derive(Debug, Serialize)]
pub struct SystemInfo {
    pub version: &'static str,
    pub build_timestamp: &'static str,
    pub git_commit: &'static str,
    pub database: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<String>,
    pub action_log: bool,
}

impl Output for SystemInfo {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("headway {} ({} {})", self.version, self.git_commit, self.build_timestamp),
            format!("database: {}", self.database),
        ];
        if let Some(config) = &self.config_file {
            lines.push(format!("config: {config}"));
        }
        lines.push(format!(
            "action log: {}",
            if self.action_log { "enabled" } else { "disabled" }
        ));
        lines.join("\n")
    }
}

pub fn system_info(config: &ResolvedConfig) -> SystemInfo {
    SystemInfo {
        version: env!("CARGO_PKG_VERSION"),
        build_timestamp: env!("HW_BUILD_TIMESTAMP"),
        git_commit: env!("HW_GIT_COMMIT"),
        database: config.database_path.to_string_lossy().to_string(),
        config_file: crate::config::config_file_path()
            .map(|p| p.to_string_lossy().to_string()),
        action_log: config.action_log,
    }
}

#[derive(Debug, Serialize)]
pub struct SystemPath {
    pub database: String,
}

impl Output for SystemPath {
    fn to_human(&self) -> String {
        self.database.clone()
    }
}

pub fn system_path(config: &ResolvedConfig) -> SystemPath {
    SystemPath {
        database: config.database_path.to_string_lossy().to_string(),
    }
}

// === Input Parsing & Formatting ===

/// Parse a user-supplied due date. Accepts the same shapes the store
/// tolerates when hydrating: `YYYY-MM-DD`, `YYYY-MM-DD HH:MM`, full ISO
/// 8601 / RFC 3339. Naive inputs are taken as UTC.
pub fn parse_due_date(s: &str) -> Result<DateTime<Utc>> {
    parse_timestamp_str(s.trim())
        .ok_or_else(|| Error::InvalidInput(format!("unrecognized date: {s}")))
}

/// `YYYY-MM-DD HH:MM` in UTC, the format used across human output.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M").to_string()
}

/// Compact "how long ago" rendering for listings.
pub fn format_relative(dt: &DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now - *dt;
    if diff.num_days() > 0 {
        format!("{}d ago", diff.num_days())
    } else if diff.num_hours() > 0 {
        format!("{}h ago", diff.num_hours())
    } else if diff.num_minutes() > 0 {
        format!("{}m ago", diff.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Truncate display text, appending an ellipsis when shortened.
pub fn truncate_text(text: &str, max_length: usize) -> String {
    const SUFFIX: &str = "...";
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_length {
        return text.to_string();
    }
    let keep = max_length.saturating_sub(SUFFIX.len());
    let mut truncated: String = chars[..keep].iter().collect();
    truncated.push_str(SUFFIX);
    truncated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestEnv;
    use chrono::Duration;

    #[test]
    fn test_project_add_validates_title() {
        let env = TestEnv::new();
        let store = env.open_store();
        assert!(matches!(
            project_add(&store, "   ", None),
            Err(Error::InvalidInput(_))
        ));
        assert!(project_add(&store, "Real project", None).is_ok());
    }

    #[test]
    fn test_task_add_requires_existing_project() {
        let env = TestEnv::new();
        let store = env.open_store();
        assert!(matches!(
            task_add(&store, 42, "orphan", None, None),
            Err(Error::NotFound(_))
        ));
    }

    #[test]
    fn test_task_add_reports_position() {
        let env = TestEnv::new();
        let store = env.open_store();
        let project = project_add(&store, "p", None).unwrap();

        let first = task_add(&store, project.id, "one", None, None).unwrap();
        let second = task_add(&store, project.id, "two", None, None).unwrap();
        assert_eq!(first.order_index, 1);
        assert_eq!(second.order_index, 2);
    }

    #[test]
    fn test_task_due_set_and_clear() {
        let env = TestEnv::new();
        let store = env.open_store();
        let project = project_add(&store, "p", None).unwrap();
        let task = task_add(&store, project.id, "t", None, None).unwrap();

        let set = task_due(&store, task.id, Some("2026-12-01 09:00".to_string()), false).unwrap();
        assert!(set.due_date.is_some());

        let cleared = task_due(&store, task.id, None, true).unwrap();
        assert!(cleared.due_date.is_none());
        assert!(store
            .get_task(task.id)
            .unwrap()
            .unwrap()
            .due_date
            .is_none());
    }

    #[test]
    fn test_task_move_round_trip() {
        let env = TestEnv::new();
        let mut store = env.open_store();
        let project = project_add(&store, "p", None).unwrap();
        let t1 = task_add(&store, project.id, "T1", None, None).unwrap();
        let t2 = task_add(&store, project.id, "T2", None, None).unwrap();

        let moved = task_move(&mut store, project.id, 1, 0).unwrap();
        assert_eq!(moved.changed, 2);
        let ids: Vec<i64> = moved.tasks.iter().filter_map(|r| r.task.id).collect();
        assert_eq!(ids, vec![t2.id, t1.id]);
    }

    #[test]
    fn test_note_flow() {
        let env = TestEnv::new();
        let store = env.open_store();
        let project = project_add(&store, "p", None).unwrap();

        let note = note_add(&store, project.id, "first draft").unwrap();
        note_edit(&store, note.id, "second draft").unwrap();

        let list = note_list(&store, project.id).unwrap();
        assert_eq!(list.notes.len(), 1);
        assert_eq!(list.notes[0].content, "second draft");

        note_rm(&store, note.id).unwrap();
        assert!(note_list(&store, project.id).unwrap().notes.is_empty());
    }

    #[test]
    fn test_project_show_aggregates() {
        let env = TestEnv::new();
        let store = env.open_store();
        let project = project_add(&store, "p", None).unwrap();
        let t1 = task_add(&store, project.id, "t1", None, None).unwrap();
        task_add(&store, project.id, "t2", None, None).unwrap();
        task_toggle(&store, t1.id).unwrap();
        note_add(&store, project.id, "n").unwrap();

        let shown = project_show(&store, project.id).unwrap();
        assert_eq!(shown.stats.total, 2);
        assert_eq!(shown.stats.completed, 1);
        assert_eq!(shown.stats.progress, 50.0);
        assert_eq!(shown.tasks.len(), 2);
        assert_eq!(shown.notes.len(), 1);
        // Completed task sorts last
        assert!(!shown.tasks[0].task.completed);
    }

    #[test]
    fn test_parse_due_date_variants() {
        assert!(parse_due_date("2026-12-01").is_ok());
        assert!(parse_due_date("2026-12-01 09:30").is_ok());
        assert!(parse_due_date("2026-12-01T09:30:00Z").is_ok());
        assert!(parse_due_date("whenever").is_err());
    }

    #[test]
    fn test_format_relative() {
        let now = Utc::now();
        assert_eq!(format_relative(&now, now), "just now");
        assert_eq!(format_relative(&(now - Duration::minutes(5)), now), "5m ago");
        assert_eq!(format_relative(&(now - Duration::hours(3)), now), "3h ago");
        assert_eq!(format_relative(&(now - Duration::days(2)), now), "2d ago");
    }

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 50), "short");
        let long = "x".repeat(60);
        let truncated = truncate_text(&long, 50);
        assert_eq!(truncated.chars().count(), 50);
        assert!(truncated.ends_with("..."));
    }
}

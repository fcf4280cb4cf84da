//! Storage layer for Headway data.
//!
//! This module is the sole reader and writer of persisted state. It owns
//! a single SQLite database file holding three tables (projects, tasks,
//! notes) plus the schema version; see [`schema`] for the layout and
//! migration story.
//!
//! Entities handed out by the store are transient copies. Callers mutate
//! them freely and must submit them back through an update operation to
//! persist anything; there is no write-through.

pub mod schema;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, TimeZone, Utc};
use rusqlite::types::{FromSqlError, ValueRef};
use rusqlite::{Connection, OptionalExtension, Row, params};
use std::fs;
use std::path::{Path, PathBuf};

use crate::models::{Note, Project, Task};
use crate::Result;

/// Store backed by a single SQLite database file.
pub struct Store {
    /// Path the database was opened at
    path: PathBuf,
    conn: Connection,
}

impl Store {
    /// Open the database at `db_path`, creating the containing directory,
    /// the file, and the schema as needed. Safe to call against an
    /// existing database: migrations are applied idempotently.
    pub fn open(db_path: &Path) -> Result<Self> {
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let conn = Connection::open(db_path)?;
        schema::init(&conn)?;

        Ok(Self {
            path: db_path.to_path_buf(),
            conn,
        })
    }

    /// Path of the underlying database file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // === Project Operations ===

    /// Insert a project and return the assigned id.
    ///
    /// The caller's in-memory instance is not updated; set the returned id
    /// on it if you intend to keep using it.
    pub fn create_project(&self, project: &Project) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO projects (title, description, created_date, updated_date)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                project.title,
                project.description,
                sql_timestamp(&project.created_date),
                sql_timestamp(&project.updated_date),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All projects, most recently touched first.
    pub fn get_all_projects(&self) -> Result<Vec<Project>> {
        let mut stmt = self
            .conn
            .prepare("SELECT * FROM projects ORDER BY updated_date DESC")?;
        let projects = stmt
            .query_map([], project_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(projects)
    }

    /// Look up a single project. Absence is not an error.
    pub fn get_project(&self, project_id: i64) -> Result<Option<Project>> {
        let project = self
            .conn
            .query_row(
                "SELECT * FROM projects WHERE id = ?1",
                [project_id],
                project_from_row,
            )
            .optional()?;
        Ok(project)
    }

    /// Overwrite title and description, stamping `updated_date` to now.
    ///
    /// The instance's own `updated_date` is ignored; calling update is
    /// what counts as touching the project. Returns false if no such row.
    pub fn update_project(&self, project: &Project) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE projects SET title = ?1, description = ?2, updated_date = ?3
             WHERE id = ?4",
            params![
                project.title,
                project.description,
                sql_timestamp(&Utc::now()),
                project.id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a project; the schema's cascade rule removes its tasks and
    /// notes in the same statement. Returns false if no such row.
    pub fn delete_project(&self, project_id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM projects WHERE id = ?1", [project_id])?;
        Ok(changed > 0)
    }

    // === Task Operations ===

    /// Insert a task and return the assigned id.
    ///
    /// The task's `order_index` is computed here as one past the highest
    /// existing index among its siblings, overwriting whatever the caller
    /// supplied; the first task in a project gets index 1.
    pub fn create_task(&self, task: &Task) -> Result<i64> {
        let next_index: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(order_index), 0) + 1 FROM tasks WHERE project_id = ?1",
            [task.project_id],
            |row| row.get(0),
        )?;

        self.conn.execute(
            "INSERT INTO tasks (project_id, title, description, completed, order_index,
                                created_date, completed_date, due_date)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                task.project_id,
                task.title,
                task.description,
                task.completed,
                next_index,
                sql_timestamp(&task.created_date),
                task.completed_date.as_ref().map(sql_timestamp),
                task.due_date.as_ref().map(sql_timestamp),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Look up a single task. Absence is not an error.
    pub fn get_task(&self, task_id: i64) -> Result<Option<Task>> {
        let task = self
            .conn
            .query_row("SELECT * FROM tasks WHERE id = ?1", [task_id], task_from_row)
            .optional()?;
        Ok(task)
    }

    /// Tasks for a project in display order: incomplete before completed,
    /// then by manual order, then by creation time for equal indices.
    pub fn get_tasks_by_project(&self, project_id: i64) -> Result<Vec<Task>> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM tasks WHERE project_id = ?1
             ORDER BY completed ASC, order_index ASC, created_date ASC",
        )?;
        let tasks = stmt
            .query_map([project_id], task_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    /// Overwrite a task's mutable fields.
    ///
    /// `order_index` belongs to the reorder protocol and `created_date` is
    /// immutable; neither is written here. Returns false if no such row.
    pub fn update_task(&self, task: &Task) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE tasks SET title = ?1, description = ?2, completed = ?3,
                              completed_date = ?4, due_date = ?5
             WHERE id = ?6",
            params![
                task.title,
                task.description,
                task.completed,
                task.completed_date.as_ref().map(sql_timestamp),
                task.due_date.as_ref().map(sql_timestamp),
                task.id,
            ],
        )?;
        Ok(changed > 0)
    }

    /// Delete a task. Returns false if no such row.
    pub fn delete_task(&self, task_id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", [task_id])?;
        Ok(changed > 0)
    }

    /// Flip a task's completion flag.
    ///
    /// Becoming complete stamps `completed_date` to now; becoming
    /// incomplete clears it. Returns the new flag, or `None` if the task
    /// does not exist.
    pub fn toggle_task_completion(&self, task_id: i64) -> Result<Option<bool>> {
        let current: Option<bool> = self
            .conn
            .query_row(
                "SELECT completed FROM tasks WHERE id = ?1",
                [task_id],
                |row| row.get(0),
            )
            .optional()?;

        let Some(completed) = current else {
            return Ok(None);
        };

        let new_completed = !completed;
        let completed_date = new_completed.then(|| sql_timestamp(&Utc::now()));

        self.conn.execute(
            "UPDATE tasks SET completed = ?1, completed_date = ?2 WHERE id = ?3",
            params![new_completed, completed_date, task_id],
        )?;
        Ok(Some(new_completed))
    }

    /// Apply a batch of `(task_id, order_index)` reassignments for one
    /// project, then touch the project's `updated_date` so listings
    /// re-sort. Runs in a single transaction.
    ///
    /// Each write is scoped with `AND project_id`, so a task id from a
    /// different project is silently skipped rather than corrupted.
    pub fn update_task_orders(&mut self, project_id: i64, orders: &[(i64, i64)]) -> Result<()> {
        let tx = self.conn.transaction()?;

        for (task_id, order_index) in orders {
            tx.execute(
                "UPDATE tasks SET order_index = ?1 WHERE id = ?2 AND project_id = ?3",
                params![order_index, task_id, project_id],
            )?;
        }

        tx.execute(
            "UPDATE projects SET updated_date = ?1 WHERE id = ?2",
            params![sql_timestamp(&Utc::now()), project_id],
        )?;

        tx.commit()?;
        Ok(())
    }

    // === Note Operations ===

    /// Insert a note and return the assigned id.
    pub fn create_note(&self, note: &Note) -> Result<i64> {
        self.conn.execute(
            "INSERT INTO notes (project_id, content, created_date) VALUES (?1, ?2, ?3)",
            params![
                note.project_id,
                note.content,
                sql_timestamp(&note.created_date),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Look up a single note. Absence is not an error.
    pub fn get_note(&self, note_id: i64) -> Result<Option<Note>> {
        let note = self
            .conn
            .query_row("SELECT * FROM notes WHERE id = ?1", [note_id], note_from_row)
            .optional()?;
        Ok(note)
    }

    /// Notes for a project, newest first.
    pub fn get_notes_by_project(&self, project_id: i64) -> Result<Vec<Note>> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM notes WHERE project_id = ?1 ORDER BY created_date DESC",
        )?;
        let notes = stmt
            .query_map([project_id], note_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }

    /// Overwrite a note's content. Returns false if no such row.
    pub fn update_note(&self, note: &Note) -> Result<bool> {
        let changed = self.conn.execute(
            "UPDATE notes SET content = ?1 WHERE id = ?2",
            params![note.content, note.id],
        )?;
        Ok(changed > 0)
    }

    /// Delete a note. Returns false if no such row.
    pub fn delete_note(&self, note_id: i64) -> Result<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM notes WHERE id = ?1", [note_id])?;
        Ok(changed > 0)
    }
}

// === Row Mapping ===
//
// Every column is read by name so that schema drift fails loudly instead
// of silently shifting values between fields.

fn project_from_row(row: &Row) -> rusqlite::Result<Project> {
    Ok(Project {
        id: Some(row.get("id")?),
        title: row.get("title")?,
        description: row.get("description")?,
        created_date: required_timestamp(row, "created_date")?,
        updated_date: required_timestamp(row, "updated_date")?,
    })
}

fn task_from_row(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: Some(row.get("id")?),
        project_id: row.get("project_id")?,
        title: row.get("title")?,
        description: row.get("description")?,
        completed: row.get("completed")?,
        order_index: row.get("order_index")?,
        created_date: required_timestamp(row, "created_date")?,
        completed_date: optional_timestamp(row, "completed_date")?,
        due_date: optional_timestamp(row, "due_date")?,
    })
}

fn note_from_row(row: &Row) -> rusqlite::Result<Note> {
    Ok(Note {
        id: Some(row.get("id")?),
        project_id: row.get("project_id")?,
        content: row.get("content")?,
        created_date: required_timestamp(row, "created_date")?,
    })
}

// === Timestamps ===

/// Canonical stored form: RFC 3339 UTC with fixed-width microseconds, so
/// the TEXT columns also sort chronologically under SQLite's default
/// collation.
pub fn sql_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Parse a stored timestamp, tolerating the representations that have
/// appeared in databases over time: RFC 3339, ISO 8601 with or without a
/// `T` separator (assumed UTC when naive), bare dates, and integer Unix
/// epochs.
pub fn parse_timestamp_str(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }
    None
}

fn decode_timestamp(raw: ValueRef<'_>) -> std::result::Result<Option<DateTime<Utc>>, FromSqlError> {
    match raw {
        ValueRef::Null => Ok(None),
        ValueRef::Integer(secs) => match Utc.timestamp_opt(secs, 0).single() {
            Some(dt) => Ok(Some(dt)),
            None => Err(FromSqlError::OutOfRange(secs)),
        },
        ValueRef::Text(bytes) => {
            let s = std::str::from_utf8(bytes)
                .map_err(|e| FromSqlError::Other(Box::new(e)))?;
            parse_timestamp_str(s)
                .map(Some)
                .ok_or_else(|| FromSqlError::Other(format!("unparseable timestamp: {s}").into()))
        }
        _ => Err(FromSqlError::InvalidType),
    }
}

fn optional_timestamp(row: &Row, column: &str) -> rusqlite::Result<Option<DateTime<Utc>>> {
    let idx = row.as_ref().column_index(column)?;
    let raw = row.get_ref(idx)?;
    let data_type = raw.data_type();
    decode_timestamp(raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, data_type, Box::new(e)))
}

fn required_timestamp(row: &Row, column: &str) -> rusqlite::Result<DateTime<Utc>> {
    let idx = row.as_ref().column_index(column)?;
    optional_timestamp(row, column)?.ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            rusqlite::types::Type::Null,
            Box::new(FromSqlError::InvalidType),
        )
    })
}

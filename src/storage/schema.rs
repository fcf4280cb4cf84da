//! On-disk schema and migrations for the Headway database.
//!
//! The schema is evolved additively: a `schema_version` table records the
//! last migration applied, and startup rolls the database forward from the
//! stored version to [`SCHEMA_VERSION`]. Databases created before
//! versioning existed are detected and treated as version 1.

use rusqlite::Connection;

use crate::Result;

/// Current schema version. Bump when adding a migration.
pub const SCHEMA_VERSION: i64 = 3;

/// Connection-level pragmas.
///
/// `foreign_keys` is off by default in SQLite; without it the cascade
/// rules on tasks and notes would silently not fire. The journal mode is
/// left at its default so the database stays a single file that the
/// backup manager can copy as an opaque blob.
pub const PRAGMAS: &str = r#"
PRAGMA foreign_keys = ON;
PRAGMA busy_timeout = 5000;
"#;

/// Full DDL for a fresh database.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS projects (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    created_date TEXT NOT NULL,
    updated_date TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL,
    title TEXT NOT NULL,
    description TEXT,
    completed INTEGER NOT NULL DEFAULT 0,
    order_index INTEGER NOT NULL DEFAULT 0,
    created_date TEXT NOT NULL,
    completed_date TEXT,
    due_date TEXT,
    FOREIGN KEY (project_id) REFERENCES projects (id) ON DELETE CASCADE
);

CREATE TABLE IF NOT EXISTS notes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    project_id INTEGER NOT NULL,
    content TEXT NOT NULL,
    created_date TEXT NOT NULL,
    FOREIGN KEY (project_id) REFERENCES projects (id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_tasks_project ON tasks(project_id);
CREATE INDEX IF NOT EXISTS idx_notes_project ON notes(project_id);

CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER NOT NULL
);
"#;

/// Initialize or roll forward the schema on an open connection.
///
/// Safe to call on every open: a fresh database gets the full current
/// schema, an up-to-date database is untouched, and an old database has
/// only the missing migrations applied. Any error other than the
/// column-already-present case (which is checked up front and skipped)
/// propagates to the caller.
pub fn init(conn: &Connection) -> Result<()> {
    conn.execute_batch(PRAGMAS)?;

    let fresh = !table_exists(conn, "projects")?;

    // IF NOT EXISTS throughout, so this also backfills missing tables
    // (notes, schema_version) on old databases without disturbing data.
    conn.execute_batch(CREATE_TABLES)?;

    if fresh {
        write_version(conn, SCHEMA_VERSION)?;
        return Ok(());
    }

    // Pre-versioning databases have a populated tasks table but an empty
    // schema_version table; their layout corresponds to version 1.
    let mut version = read_version(conn)?.unwrap_or(1);

    while version < SCHEMA_VERSION {
        version += 1;
        apply_migration(conn, version)?;
    }

    write_version(conn, SCHEMA_VERSION)?;
    Ok(())
}

/// Apply a single migration step.
fn apply_migration(conn: &Connection, version: i64) -> Result<()> {
    match version {
        // v2: manual task ordering
        2 => add_column(conn, "tasks", "order_index", "INTEGER NOT NULL DEFAULT 0"),
        // v3: optional due dates
        3 => add_column(conn, "tasks", "due_date", "TEXT"),
        _ => Ok(()),
    }
}

/// Add a column if it is not already present.
///
/// SQLite has no `ALTER TABLE ... ADD COLUMN IF NOT EXISTS`, so presence
/// is checked through `pragma_table_info` first. Re-running a migration
/// against a database that already has the column is a no-op, not an
/// error; any other failure propagates.
fn add_column(conn: &Connection, table: &str, column: &str, definition: &str) -> Result<()> {
    if column_exists(conn, table, column)? {
        return Ok(());
    }
    conn.execute(
        &format!("ALTER TABLE {} ADD COLUMN {} {}", table, column, definition),
        [],
    )?;
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
        [table],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM pragma_table_info(?1) WHERE name = ?2",
        [table, column],
        |row| row.get(0),
    )?;
    Ok(count > 0)
}

fn read_version(conn: &Connection) -> Result<Option<i64>> {
    let mut stmt = conn.prepare("SELECT version FROM schema_version LIMIT 1")?;
    let mut rows = stmt.query([])?;
    match rows.next()? {
        Some(row) => Ok(Some(row.get(0)?)),
        None => Ok(None),
    }
}

fn write_version(conn: &Connection, version: i64) -> Result<()> {
    conn.execute("DELETE FROM schema_version", [])?;
    conn.execute(
        "INSERT INTO schema_version (version) VALUES (?1)",
        [version],
    )?;
    Ok(())
}

//! Backup and restore for the database file.
//!
//! The database is treated as an opaque blob: a backup is a whole-file
//! copy into a `backups/` directory next to the database, gated by a
//! storage-level integrity check on both the source and the copy. Restore
//! snapshots the current file first, so a bad restore can always be
//! undone. The store must be reopened after a restore.

use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Manages backups for one database file.
pub struct BackupManager {
    db_path: PathBuf,
    backup_dir: PathBuf,
}

/// A single backup file on disk.
#[derive(Debug, Clone, Serialize)]
pub struct BackupInfo {
    pub file_name: String,
    pub created: DateTime<Utc>,
    pub size_bytes: u64,
    pub size: String,
}

impl BackupManager {
    /// Create a manager for the given database file. The `backups/`
    /// directory is created next to the database if absent.
    pub fn new(db_path: &Path) -> Result<Self> {
        let backup_dir = db_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .join("backups");
        fs::create_dir_all(&backup_dir)?;

        Ok(Self {
            db_path: db_path.to_path_buf(),
            backup_dir,
        })
    }

    /// Directory backups are written to.
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Copy the database into the backup directory.
    ///
    /// The source is integrity-checked before copying and the copy is
    /// integrity-checked afterwards; a copy that fails verification is
    /// removed. Returns the path of the new backup file.
    pub fn create_backup(&self, custom_name: Option<&str>) -> Result<PathBuf> {
        if !self.db_path.exists() {
            return Err(Error::Backup("database file not found".to_string()));
        }

        if !verify_integrity(&self.db_path)? {
            return Err(Error::Backup(
                "database failed integrity check; refusing to back it up".to_string(),
            ));
        }

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let file_name = match custom_name.map(sanitize_name) {
            Some(name) if !name.is_empty() => format!("{name}_{timestamp}.db"),
            _ => format!("backup_{timestamp}.db"),
        };
        let backup_path = self.backup_dir.join(&file_name);

        fs::copy(&self.db_path, &backup_path)?;

        if !verify_integrity(&backup_path)? {
            fs::remove_file(&backup_path)?;
            return Err(Error::Backup(
                "backup copy failed integrity check".to_string(),
            ));
        }

        Ok(backup_path)
    }

    /// Replace the database with a backup.
    ///
    /// The backup is integrity-checked, the current database is
    /// snapshotted (name prefix `before_restore`), and the restored file
    /// is verified. Returns the path of the safety snapshot.
    pub fn restore_backup(&self, file_name: &str) -> Result<PathBuf> {
        let backup_path = self.resolve(file_name)?;
        if !backup_path.exists() {
            return Err(Error::Backup(format!("backup not found: {file_name}")));
        }

        if !verify_integrity(&backup_path)? {
            return Err(Error::Backup(format!(
                "backup failed integrity check: {file_name}"
            )));
        }

        let snapshot = self.create_backup(Some("before_restore"))?;

        fs::copy(&backup_path, &self.db_path)?;

        if !verify_integrity(&self.db_path)? {
            return Err(Error::Backup(
                "restored database failed integrity check; the pre-restore snapshot is intact"
                    .to_string(),
            ));
        }

        Ok(snapshot)
    }

    /// All backups, newest first.
    pub fn list_backups(&self) -> Result<Vec<BackupInfo>> {
        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir)? {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            if !file_name.ends_with(".db") {
                continue;
            }

            let metadata = entry.metadata()?;
            let created: DateTime<Utc> = metadata
                .modified()
                .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
                .into();

            backups.push(BackupInfo {
                file_name,
                created,
                size_bytes: metadata.len(),
                size: format_file_size(metadata.len()),
            });
        }

        backups.sort_by(|a, b| b.created.cmp(&a.created));
        Ok(backups)
    }

    /// Delete a backup file.
    pub fn delete_backup(&self, file_name: &str) -> Result<()> {
        let backup_path = self.resolve(file_name)?;
        if !backup_path.exists() {
            return Err(Error::Backup(format!("backup not found: {file_name}")));
        }
        fs::remove_file(&backup_path)?;
        Ok(())
    }

    /// Resolve a backup file name inside the backup directory, rejecting
    /// anything that would escape it.
    fn resolve(&self, file_name: &str) -> Result<PathBuf> {
        if file_name.contains('/') || file_name.contains('\\') || file_name.contains("..") {
            return Err(Error::Backup(format!(
                "invalid backup file name: {file_name}"
            )));
        }
        Ok(self.backup_dir.join(file_name))
    }
}

/// Run `PRAGMA integrity_check` against a database file.
fn verify_integrity(path: &Path) -> Result<bool> {
    let conn = match Connection::open(path) {
        Ok(conn) => conn,
        Err(_) => return Ok(false),
    };
    let result: std::result::Result<String, _> =
        conn.query_row("PRAGMA integrity_check", [], |row| row.get(0));
    Ok(matches!(result, Ok(s) if s == "ok"))
}

/// Strip a user-supplied backup name down to filesystem-safe characters.
fn sanitize_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == ' ' || *c == '-' || *c == '_')
        .collect::<String>()
        .trim()
        .replace(' ', "_")
}

/// Render a byte count for humans.
pub fn format_file_size(size_bytes: u64) -> String {
    if size_bytes < 1024 {
        format!("{size_bytes} B")
    } else if size_bytes < 1024 * 1024 {
        format!("{:.1} KB", size_bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", size_bytes as f64 / (1024.0 * 1024.0))
    }
}

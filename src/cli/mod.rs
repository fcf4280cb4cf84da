//! CLI argument definitions for Headway.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Headway - track project progress with tasks and notes.
///
/// Start with `hw project add` to create a project, then `hw task add` to
/// fill it. `hw project list` shows completion progress across projects.
#[derive(Parser, Debug)]
#[command(name = "hw")]
#[command(author, version, about = "A CLI tool for tracking project progress with tasks and notes", long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Output in human-readable format instead of JSON
    #[arg(short = 'H', long = "human", global = true)]
    pub human_readable: bool,

    /// Database file to operate on. Defaults to the configured path, or
    /// the platform data directory. Can also be set via HW_DB.
    #[arg(long = "db", global = true, env = "HW_DB")]
    pub db_path: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Project management commands
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },

    /// Task management commands
    Task {
        #[command(subcommand)]
        command: TaskCommands,
    },

    /// Note management commands
    Note {
        #[command(subcommand)]
        command: NoteCommands,
    },

    /// Backup and restore commands
    Backup {
        #[command(subcommand)]
        command: BackupCommands,
    },

    /// System information commands
    System {
        #[command(subcommand)]
        command: SystemCommands,
    },
}

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a new project
    Add {
        /// Project title (at most 100 characters)
        title: String,

        /// Detailed description
        #[arg(short = 'd', long = "desc")]
        description: Option<String>,
    },

    /// List all projects, most recently touched first
    List,

    /// Show one project with its tasks, notes, progress, and status
    Show {
        /// Project id
        id: i64,
    },

    /// Edit a project's title or description
    Edit {
        /// Project id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Delete a project and everything in it
    Rm {
        /// Project id
        id: i64,
    },
}

/// Task subcommands
#[derive(Subcommand, Debug)]
pub enum TaskCommands {
    /// Add a task to a project
    Add {
        /// Owning project id
        project_id: i64,

        /// Task title (at most 200 characters)
        title: String,

        /// Detailed description
        #[arg(short = 'd', long = "desc")]
        description: Option<String>,

        /// Due date: YYYY-MM-DD, "YYYY-MM-DD HH:MM", or RFC 3339
        #[arg(long)]
        due: Option<String>,
    },

    /// List a project's tasks in display order
    List {
        /// Project id
        project_id: i64,
    },

    /// Edit a task's title or description
    Edit {
        /// Task id
        id: i64,

        /// New title
        #[arg(long)]
        title: Option<String>,

        /// New description
        #[arg(long = "desc")]
        description: Option<String>,
    },

    /// Toggle a task's completion flag
    Toggle {
        /// Task id
        id: i64,
    },

    /// Set or clear a task's due date
    Due {
        /// Task id
        id: i64,

        /// Due date: YYYY-MM-DD, "YYYY-MM-DD HH:MM", or RFC 3339
        when: Option<String>,

        /// Clear the due date instead of setting one
        #[arg(long, conflicts_with = "when")]
        clear: bool,
    },

    /// Move a task to a new display position
    ///
    /// Positions are 0-based within the list shown by `hw task list`.
    /// A target past the end means "move to last".
    Move {
        /// Project id
        project_id: i64,

        /// Current display position
        from: usize,

        /// Target display position
        to: usize,
    },

    /// Delete a task
    Rm {
        /// Task id
        id: i64,
    },
}

/// Note subcommands
#[derive(Subcommand, Debug)]
pub enum NoteCommands {
    /// Add a note to a project
    Add {
        /// Owning project id
        project_id: i64,

        /// Note content
        content: String,
    },

    /// List a project's notes, newest first
    List {
        /// Project id
        project_id: i64,
    },

    /// Replace a note's content
    Edit {
        /// Note id
        id: i64,

        /// New content
        content: String,
    },

    /// Delete a note
    Rm {
        /// Note id
        id: i64,
    },
}

/// Backup subcommands
#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// Create a backup of the database
    Create {
        /// Optional name prefix for the backup file
        #[arg(long)]
        name: Option<String>,
    },

    /// List existing backups, newest first
    List,

    /// Restore a backup (the current database is snapshotted first)
    Restore {
        /// Backup file name, as shown by `hw backup list`
        file: String,
    },

    /// Delete a backup file
    Rm {
        /// Backup file name
        file: String,
    },
}

/// System subcommands
#[derive(Subcommand, Debug)]
pub enum SystemCommands {
    /// Show version, build, and configuration information
    Info,

    /// Print the resolved database path
    Path,
}

//! Headway CLI - track project progress with tasks and notes.

use clap::Parser;
use headway::cli::{
    BackupCommands, Cli, Commands, NoteCommands, ProjectCommands, SystemCommands, TaskCommands,
};
use headway::commands::{self, Output};
use headway::config::{self, ConfigOverrides, OutputFormat, ResolvedConfig};
use headway::storage::Store;
use headway::{Error, action_log};
use std::process;
use std::time::Instant;

fn main() {
    let cli = Cli::parse();

    // Settings precedence: flags (clap also folds HW_DB in) > config file
    // > defaults
    let overrides = ConfigOverrides {
        db_path: cli.db_path.clone(),
        human: cli.human_readable,
    };
    let config = match config::resolve(&overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    let human = config.output_format == OutputFormat::Human;

    // Serialize command for logging
    let (cmd_name, args_json) = serialize_command(&cli.command);

    // Execute command, timed for the action log
    let start = Instant::now();
    let result = run_command(cli.command, &config, human);
    let duration = start.elapsed().as_millis() as u64;

    let (success, error) = match &result {
        Ok(_) => (true, None),
        Err(e) => (false, Some(e.to_string())),
    };

    // Fire-and-forget; logging problems must never fail the command
    if config.action_log {
        action_log::log_action(
            &config.database_path,
            &cmd_name,
            args_json,
            success,
            error,
            duration,
        );
    }

    if let Err(e) = result {
        if human {
            eprintln!("Error: {e}");
        } else {
            eprintln!("{}", serde_json::json!({ "error": e.to_string() }));
        }
        process::exit(1);
    }
}

fn run_command(command: Commands, config: &ResolvedConfig, human: bool) -> Result<(), Error> {
    match command {
        Commands::Project { command } => {
            let store = Store::open(&config.database_path)?;
            match command {
                ProjectCommands::Add { title, description } => {
                    output(&commands::project_add(&store, &title, description)?, human);
                }
                ProjectCommands::List => {
                    output(&commands::project_list(&store)?, human);
                }
                ProjectCommands::Show { id } => {
                    output(&commands::project_show(&store, id)?, human);
                }
                ProjectCommands::Edit {
                    id,
                    title,
                    description,
                } => {
                    output(&commands::project_edit(&store, id, title, description)?, human);
                }
                ProjectCommands::Rm { id } => {
                    output(&commands::project_rm(&store, id)?, human);
                }
            }
        }

        Commands::Task { command } => {
            let mut store = Store::open(&config.database_path)?;
            match command {
                TaskCommands::Add {
                    project_id,
                    title,
                    description,
                    due,
                } => {
                    output(
                        &commands::task_add(&store, project_id, &title, description, due)?,
                        human,
                    );
                }
                TaskCommands::List { project_id } => {
                    output(&commands::task_list(&store, project_id)?, human);
                }
                TaskCommands::Edit {
                    id,
                    title,
                    description,
                } => {
                    output(&commands::task_edit(&store, id, title, description)?, human);
                }
                TaskCommands::Toggle { id } => {
                    output(&commands::task_toggle(&store, id)?, human);
                }
                TaskCommands::Due { id, when, clear } => {
                    output(&commands::task_due(&store, id, when, clear)?, human);
                }
                TaskCommands::Move {
                    project_id,
                    from,
                    to,
                } => {
                    output(&commands::task_move(&mut store, project_id, from, to)?, human);
                }
                TaskCommands::Rm { id } => {
                    output(&commands::task_rm(&store, id)?, human);
                }
            }
        }

        Commands::Note { command } => {
            let store = Store::open(&config.database_path)?;
            match command {
                NoteCommands::Add {
                    project_id,
                    content,
                } => {
                    output(&commands::note_add(&store, project_id, &content)?, human);
                }
                NoteCommands::List { project_id } => {
                    output(&commands::note_list(&store, project_id)?, human);
                }
                NoteCommands::Edit { id, content } => {
                    output(&commands::note_edit(&store, id, &content)?, human);
                }
                NoteCommands::Rm { id } => {
                    output(&commands::note_rm(&store, id)?, human);
                }
            }
        }

        // Backups treat the database as an opaque file; no store is
        // opened, so no connection is live while the file is replaced.
        Commands::Backup { command } => match command {
            BackupCommands::Create { name } => {
                output(&commands::backup_create(&config.database_path, name)?, human);
            }
            BackupCommands::List => {
                output(&commands::backup_list(&config.database_path)?, human);
            }
            BackupCommands::Restore { file } => {
                output(&commands::backup_restore(&config.database_path, &file)?, human);
            }
            BackupCommands::Rm { file } => {
                output(&commands::backup_rm(&config.database_path, &file)?, human);
            }
        },

        Commands::System { command } => match command {
            SystemCommands::Info => {
                output(&commands::system_info(config), human);
            }
            SystemCommands::Path => {
                output(&commands::system_path(config), human);
            }
        },
    }

    Ok(())
}

/// Print output in JSON or human-readable format.
fn output<T: Output>(result: &T, human: bool) {
    if human {
        println!("{}", result.to_human());
    } else {
        println!("{}", result.to_json());
    }
}

/// Command name and loggable arguments for the action log.
fn serialize_command(command: &Commands) -> (String, serde_json::Value) {
    use serde_json::json;

    match command {
        Commands::Project { command } => match command {
            ProjectCommands::Add { title, .. } => ("project add".into(), json!({ "title": title })),
            ProjectCommands::List => ("project list".into(), json!({})),
            ProjectCommands::Show { id } => ("project show".into(), json!({ "id": id })),
            ProjectCommands::Edit { id, .. } => ("project edit".into(), json!({ "id": id })),
            ProjectCommands::Rm { id } => ("project rm".into(), json!({ "id": id })),
        },
        Commands::Task { command } => match command {
            TaskCommands::Add {
                project_id, title, ..
            } => (
                "task add".into(),
                json!({ "project_id": project_id, "title": title }),
            ),
            TaskCommands::List { project_id } => {
                ("task list".into(), json!({ "project_id": project_id }))
            }
            TaskCommands::Edit { id, .. } => ("task edit".into(), json!({ "id": id })),
            TaskCommands::Toggle { id } => ("task toggle".into(), json!({ "id": id })),
            TaskCommands::Due { id, when, clear } => (
                "task due".into(),
                json!({ "id": id, "when": when, "clear": clear }),
            ),
            TaskCommands::Move {
                project_id,
                from,
                to,
            } => (
                "task move".into(),
                json!({ "project_id": project_id, "from": from, "to": to }),
            ),
            TaskCommands::Rm { id } => ("task rm".into(), json!({ "id": id })),
        },
        Commands::Note { command } => match command {
            NoteCommands::Add { project_id, .. } => {
                ("note add".into(), json!({ "project_id": project_id }))
            }
            NoteCommands::List { project_id } => {
                ("note list".into(), json!({ "project_id": project_id }))
            }
            NoteCommands::Edit { id, .. } => ("note edit".into(), json!({ "id": id })),
            NoteCommands::Rm { id } => ("note rm".into(), json!({ "id": id })),
        },
        Commands::Backup { command } => match command {
            BackupCommands::Create { name } => ("backup create".into(), json!({ "name": name })),
            BackupCommands::List => ("backup list".into(), json!({})),
            BackupCommands::Restore { file } => ("backup restore".into(), json!({ "file": file })),
            BackupCommands::Rm { file } => ("backup rm".into(), json!({ "file": file })),
        },
        Commands::System { command } => match command {
            SystemCommands::Info => ("system info".into(), json!({})),
            SystemCommands::Path => ("system path".into(), json!({})),
        },
    }
}

//! Precedence resolution for configuration values.
//!
//! Each setting is resolved independently:
//! CLI flag > `HW_DB` environment variable (handled by clap on the flag
//! itself) > config.kdl > built-in default.

use std::fs;
use std::path::PathBuf;

use crate::config::schema::{HeadwayConfig, OutputFormat};
use crate::Result;

/// Values the CLI layer may override.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    /// From `--db` (or `HW_DB`, which clap folds into the flag)
    pub db_path: Option<PathBuf>,
    /// From `-H/--human`
    pub human: bool,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub database_path: PathBuf,
    pub output_format: OutputFormat,
    pub action_log: bool,
}

/// Location of the user config file, if a config directory exists on this
/// platform.
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("headway").join("config.kdl"))
}

/// Built-in default database location.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("headway")
        .join("headway.db")
}

/// Load the config file; a missing file is an empty config, a malformed
/// one is an error the user should see.
pub fn load_config() -> Result<HeadwayConfig> {
    let Some(path) = config_file_path() else {
        return Ok(HeadwayConfig::default());
    };
    if !path.exists() {
        return Ok(HeadwayConfig::default());
    }
    let contents = fs::read_to_string(&path)?;
    HeadwayConfig::parse(&contents)
}

/// Resolve the settings for this invocation.
pub fn resolve(overrides: &ConfigOverrides) -> Result<ResolvedConfig> {
    let config = load_config()?;

    let database_path = overrides
        .db_path
        .clone()
        .or_else(|| config.database_path.as_ref().map(PathBuf::from))
        .unwrap_or_else(default_db_path);

    let output_format = if overrides.human {
        OutputFormat::Human
    } else {
        config.output_format.unwrap_or_default()
    };

    Ok(ResolvedConfig {
        database_path,
        output_format,
        action_log: config.action_log.unwrap_or(true),
    })
}

//! KDL schema for config.kdl.

use kdl::KdlDocument;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Output format preference for CLI commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON output (default, machine-readable)
    #[default]
    Json,
    /// Human-readable output
    Human,
}

impl OutputFormat {
    /// Parse from string, case-insensitive.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "human" => Some(OutputFormat::Human),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Human => "human",
        }
    }
}

/// User preferences stored in config.kdl.
///
/// Every field is optional; unset fields fall through to the next layer
/// of the precedence chain. Unknown nodes and malformed values are
/// ignored rather than rejected, so an old binary can read a newer file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadwayConfig {
    /// Default output format for CLI commands
    pub output_format: Option<OutputFormat>,

    /// Database file location
    pub database_path: Option<String>,

    /// Whether to append each command to the action log
    pub action_log: Option<bool>,
}

impl HeadwayConfig {
    /// Parse config from KDL text.
    pub fn parse(contents: &str) -> Result<Self> {
        let doc: KdlDocument = contents
            .parse()
            .map_err(|e| Error::Config(format!("failed to parse config.kdl: {e}")))?;
        Ok(Self::from_kdl(&doc))
    }

    /// Parse config from a KDL document.
    pub fn from_kdl(doc: &KdlDocument) -> Self {
        let mut config = Self::default();

        if let Some(node) = doc.get("output-format") {
            if let Some(entry) = node.entries().first() {
                if let Some(s) = entry.value().as_string() {
                    config.output_format = OutputFormat::parse(s);
                }
            }
        }

        if let Some(node) = doc.get("database-path") {
            if let Some(entry) = node.entries().first() {
                if let Some(s) = entry.value().as_string() {
                    config.database_path = Some(s.to_string());
                }
            }
        }

        if let Some(node) = doc.get("action-log") {
            if let Some(entry) = node.entries().first() {
                if let Some(b) = entry.value().as_bool() {
                    config.action_log = Some(b);
                }
            }
        }

        config
    }
}

//! Configuration for Headway.
//!
//! User preferences live in a single KDL file:
//!
//! - System: `~/.config/headway/config.kdl`
//!
//! ```kdl
//! // User preferences - safe to sync across machines
//! output-format "human"          // or "json"
//! database-path "/home/me/notes/headway.db"
//! action-log #false              // disable the command audit log
//! ```
//!
//! ## Precedence
//!
//! CLI flag > environment variable (`HW_DB`) > config file > built-in
//! default. The [`resolver`] module performs the resolution; `main`
//! constructs the overrides from clap once and passes the resolved
//! settings down.

pub mod resolver;
pub mod schema;

pub use resolver::{ConfigOverrides, ResolvedConfig, config_file_path, resolve};
pub use schema::{HeadwayConfig, OutputFormat};

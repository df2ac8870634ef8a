//! CLI module for aerodb-paginate
//!
//! Provides command-line interface for:
//! - serve: Load descriptors and run the HTTP server
//! - plan: One-shot plan compilation for inspection

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{load_config, load_schemas, plan, run, run_command, serve};
pub use errors::{CliError, CliResult};

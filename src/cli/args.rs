//! CLI argument definitions using clap
//!
//! Commands:
//! - aerodb-paginate serve --config <path> [--port <port>]
//! - aerodb-paginate plan --schema-dir <dir> --model <model> --query <qs>

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query-string filtering, ordering and pagination over registered models
#[derive(Parser, Debug)]
#[command(name = "aerodb-paginate")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Load model descriptors and start the HTTP server
    Serve {
        /// Path to configuration file
        #[arg(long, default_value = "./aerodb-paginate.json")]
        config: PathBuf,

        /// Override the configured port
        #[arg(long)]
        port: Option<u16>,
    },

    /// Compile a query string against a model and print the plan
    Plan {
        /// Directory holding model descriptors
        #[arg(long, default_value = "./schemas")]
        schema_dir: PathBuf,

        /// Model to plan against
        #[arg(long)]
        model: String,

        /// Raw query string, e.g. "page=2&age_gte=18&order_by=-age"
        #[arg(long, default_value = "")]
        query: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

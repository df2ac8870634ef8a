//! CLI command implementations
//!
//! - serve: load config and descriptors, then run the HTTP server
//! - plan: compile one query string and print the plan as JSON

use std::fs;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;

use serde_json::{json, Value};

use super::args::Command;
use super::errors::{CliError, CliResult};
use crate::compiler::Compiler;
use crate::http_server::{AppState, HttpServer, HttpServerConfig};
use crate::observability::{log_event_with_fields, Event};
use crate::query::RawParams;
use crate::schema::SchemaLoader;

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Plan {
            schema_dir,
            model,
            query,
        } => {
            let output = plan(&schema_dir, &model, &query)?;
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &output).map_err(io::Error::from)?;
            writeln!(stdout)?;
            Ok(())
        }
    }
}

/// Load server configuration from a JSON file
pub fn load_config(path: &Path) -> CliResult<HttpServerConfig> {
    let content = fs::read_to_string(path)
        .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

    let config: HttpServerConfig = serde_json::from_str(&content)
        .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

    log_event_with_fields(
        Event::ConfigLoaded,
        &[
            ("path", &path.display().to_string()),
            ("addr", &config.socket_addr()),
        ],
    );

    Ok(config)
}

/// Load every descriptor under `schema_dir`
pub fn load_schemas(schema_dir: &Path) -> CliResult<SchemaLoader> {
    let mut loader = SchemaLoader::new(schema_dir);
    let count = loader.load_all()?;

    log_event_with_fields(
        Event::SchemasLoaded,
        &[
            ("dir", &schema_dir.display().to_string()),
            ("files", &count.to_string()),
            ("models", &loader.model_names().join(",")),
        ],
    );

    Ok(loader)
}

/// Serve paginated listings over HTTP
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = load_config(config_path)?;
    if let Some(port) = port {
        config.port = port;
    }

    let schemas = load_schemas(&config.schema_dir)?;
    let state = Arc::new(AppState::new(schemas, Compiler::new(config.compile)));
    let server = HttpServer::with_state(config, state);

    // Start the async runtime and run the server
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::server_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::server_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Compile `query` for `model` without an executor.
///
/// Returns `{"model", "plan", "dropped"}`.
pub fn plan(schema_dir: &Path, model: &str, query: &str) -> CliResult<Value> {
    let schemas = load_schemas(schema_dir)?;
    let params = RawParams::from_query_string(query);

    let (plan, diagnostics) = Compiler::default().plan(model, &params, &schemas)?;

    Ok(json!({
        "model": model,
        "plan": plan,
        "dropped": diagnostics,
    }))
}

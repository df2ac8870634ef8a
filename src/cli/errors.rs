//! CLI-specific error types
//!
//! All CLI errors are fatal: `main` prints them and exits non-zero.

use thiserror::Error;

use crate::compiler::CompileError;
use crate::schema::SchemaError;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// CLI error
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration file could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Model descriptors could not be loaded
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Compilation failed
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Runtime or listener failure
    #[error("Server failed: {0}")]
    Server(String),

    /// Output could not be written
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Config error
    pub fn config_error(msg: impl Into<String>) -> Self {
        CliError::Config(msg.into())
    }

    /// Server error
    pub fn server_failed(msg: impl Into<String>) -> Self {
        CliError::Server(msg.into())
    }

    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            CliError::Config(_) => "AERO_CLI_CONFIG_ERROR",
            CliError::Schema(e) => e.code(),
            CliError::Compile(e) => e.code(),
            CliError::Server(_) => "AERO_CLI_SERVER_FAILED",
            CliError::Io(_) => "AERO_CLI_IO_ERROR",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(CliError::config_error("x").code(), "AERO_CLI_CONFIG_ERROR");
        assert_eq!(CliError::server_failed("x").code(), "AERO_CLI_SERVER_FAILED");
        assert_eq!(
            CliError::from(SchemaError::unknown_model("users")).code(),
            "AERO_UNKNOWN_MODEL"
        );
    }

    #[test]
    fn test_display() {
        let err = CliError::config_error("Failed to read config");
        assert_eq!(err.to_string(), "Configuration error: Failed to read config");
    }
}

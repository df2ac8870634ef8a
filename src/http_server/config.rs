//! HTTP Server Configuration
//!
//! Host, port, CORS, schema location and count policy. Loaded from a JSON
//! file by the CLI; every field has a default.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::compiler::CompileConfig;

/// HTTP server configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpServerConfig {
    /// Host to bind to (default: "0.0.0.0")
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to (default: 8080)
    #[serde(default = "default_port")]
    pub port: u16,

    /// CORS allowed origins (default: none, which allows any origin)
    #[serde(default)]
    pub cors_origins: Vec<String>,

    /// Directory holding model descriptors (default: "./schemas")
    #[serde(default = "default_schema_dir")]
    pub schema_dir: PathBuf,

    /// Compiler settings
    #[serde(flatten)]
    pub compile: CompileConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_schema_dir() -> PathBuf {
    PathBuf::from("./schemas")
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: Vec::new(),
            schema_dir: default_schema_dir(),
            compile: CompileConfig::default(),
        }
    }
}

impl HttpServerConfig {
    /// Create a new config with specified port
    pub fn with_port(port: u16) -> Self {
        Self {
            port,
            ..Default::default()
        }
    }

    /// Get the socket address string
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

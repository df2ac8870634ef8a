//! Schema error types
//!
//! Error codes:
//! - AERO_UNKNOWN_MODEL (REJECT)
//! - AERO_MALFORMED_SCHEMA (REJECT)
//! - AERO_SCHEMA_IMMUTABLE (REJECT)

use thiserror::Error;

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Raised when a model cannot be introspected.
///
/// Fatal to the request that triggered it; never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// No descriptor registered under this model name
    #[error("Model '{0}' is not registered")]
    UnknownModel(String),

    /// Descriptor exists but cannot be read or is structurally invalid
    #[error("Malformed schema '{location}': {reason}")]
    Malformed { location: String, reason: String },

    /// A descriptor for this model was already registered
    #[error("Model '{0}' is already registered")]
    Immutable(String),
}

impl SchemaError {
    /// Create an unknown model error
    pub fn unknown_model(model: impl Into<String>) -> Self {
        SchemaError::UnknownModel(model.into())
    }

    /// Create an error for a malformed descriptor or schema file
    pub fn malformed_schema(location: impl Into<String>, reason: impl Into<String>) -> Self {
        SchemaError::Malformed {
            location: location.into(),
            reason: reason.into(),
        }
    }

    /// Create a schema immutable error
    pub fn schema_immutable(model: impl Into<String>) -> Self {
        SchemaError::Immutable(model.into())
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaError::UnknownModel(_) => "AERO_UNKNOWN_MODEL",
            SchemaError::Malformed { .. } => "AERO_MALFORMED_SCHEMA",
            SchemaError::Immutable(_) => "AERO_SCHEMA_IMMUTABLE",
        }
    }
}

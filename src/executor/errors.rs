//! Executor error types
//!
//! Executor failures are surfaced to the caller unchanged. Nothing in this
//! crate retries them.

use thiserror::Error;

/// Result type for executor operations
pub type ExecutorResult<T> = Result<T, ExecutorError>;

/// Failure of a count or data query
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutorError {
    /// Count query failed
    #[error("Count query on '{model}' failed: {reason}")]
    CountFailed { model: String, reason: String },

    /// Data query failed
    #[error("Data query on '{model}' failed: {reason}")]
    QueryFailed { model: String, reason: String },

    /// The store cannot be reached or its state is unusable
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A record handed to the store was rejected
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl ExecutorError {
    pub fn count_failed(model: impl Into<String>, reason: impl Into<String>) -> Self {
        ExecutorError::CountFailed {
            model: model.into(),
            reason: reason.into(),
        }
    }

    pub fn query_failed(model: impl Into<String>, reason: impl Into<String>) -> Self {
        ExecutorError::QueryFailed {
            model: model.into(),
            reason: reason.into(),
        }
    }

    /// Returns the stable error code
    pub fn code(&self) -> &'static str {
        match self {
            ExecutorError::CountFailed { .. } => "AERO_EXECUTOR_COUNT_FAILED",
            ExecutorError::QueryFailed { .. } => "AERO_EXECUTOR_QUERY_FAILED",
            ExecutorError::Unavailable(_) => "AERO_EXECUTOR_UNAVAILABLE",
            ExecutorError::InvalidRecord(_) => "AERO_EXECUTOR_INVALID_RECORD",
        }
    }
}

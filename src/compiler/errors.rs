//! Compile errors
//!
//! Parameter problems never show up here; they are dropped during parsing.
//! Only schema and executor failures abort a compile.

use thiserror::Error;

use crate::executor::ExecutorError;
use crate::schema::SchemaError;

/// Result type for compile operations
pub type CompileResult<T> = Result<T, CompileError>;

/// Compile failure
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Model could not be introspected
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Count or data query failed
    #[error(transparent)]
    Executor(#[from] ExecutorError),
}

impl CompileError {
    /// Returns the stable error code of the underlying failure
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::Schema(err) => err.code(),
            CompileError::Executor(err) => err.code(),
        }
    }
}

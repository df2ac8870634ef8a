//! # HTTP Errors
//!
//! Maps schema and executor failures to status codes and a JSON body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::compiler::CompileError;
use crate::executor::ExecutorError;
use crate::schema::SchemaError;

/// Result type for HTTP handlers
pub type HttpResult<T> = Result<T, HttpError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum HttpError {
    /// Model lookup or introspection failed
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Store failed
    #[error(transparent)]
    Executor(#[from] ExecutorError),

    /// Invalid request body
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Request handling failed outside the store
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<CompileError> for HttpError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Schema(e) => HttpError::Schema(e),
            CompileError::Executor(e) => HttpError::Executor(e),
        }
    }
}

impl HttpError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            HttpError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            HttpError::Executor(ExecutorError::InvalidRecord(_)) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            HttpError::Schema(SchemaError::UnknownModel(_)) => StatusCode::NOT_FOUND,

            // 503 Service Unavailable
            HttpError::Executor(ExecutorError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,

            // 500 Internal Server Error
            HttpError::Schema(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Executor(_) => StatusCode::INTERNAL_SERVER_ERROR,
            HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<HttpError> for ErrorResponse {
    fn from(err: HttpError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

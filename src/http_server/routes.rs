//! API Routes
//!
//! - `GET  /health`       health check
//! - `GET  /api/:model`   one page of records, filtered and sorted by the query string
//! - `POST /api/:model`   append records (a JSON object or array of objects)

use std::sync::Arc;

use axum::{
    extract::{Path, RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value;

use super::errors::{HttpError, HttpResult};
use crate::compiler::{Compiler, PageResult};
use crate::executor::InMemoryExecutor;
use crate::observability::{log_event_with_fields, Event};
use crate::query::RawParams;
use crate::schema::{FieldCache, SchemaLoader, SchemaSource};

// ==================
// Shared State
// ==================

/// State shared across handlers
pub struct AppState {
    pub schemas: FieldCache<SchemaLoader>,
    pub store: InMemoryExecutor,
    pub compiler: Compiler,
}

impl AppState {
    pub fn new(schemas: SchemaLoader, compiler: Compiler) -> Self {
        Self {
            schemas: FieldCache::new(schemas),
            store: InMemoryExecutor::new(),
            compiler,
        }
    }
}

// ==================
// Response Types
// ==================

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Insert response
#[derive(Debug, Serialize)]
pub struct InsertResponse {
    pub inserted: usize,
}

// ==================
// Routes
// ==================

/// Health check route
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

/// Model listing and seeding routes
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/:model", get(list_handler).post(insert_handler))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn list_handler(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    RawQuery(query): RawQuery,
) -> HttpResult<Json<PageResult<Value>>> {
    let params = RawParams::from_query_string(query.as_deref().unwrap_or(""));

    // Executors are synchronous; keep them off the async workers
    let result = tokio::task::spawn_blocking(move || {
        state
            .compiler
            .compile(&model, &params, &state.schemas, &state.store)
    })
    .await
    .map_err(|e| HttpError::Internal(format!("Compile task failed: {}", e)))??;

    Ok(Json(result))
}

async fn insert_handler(
    State(state): State<Arc<AppState>>,
    Path(model): Path<String>,
    Json(body): Json<Value>,
) -> HttpResult<(StatusCode, Json<InsertResponse>)> {
    // Only registered models accept records
    state.schemas.fields_of(&model)?;

    let records = match body {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        _ => {
            return Err(HttpError::InvalidBody(
                "expected a JSON object or an array of objects".to_string(),
            ))
        }
    };

    let inserted = state.store.insert(&model, records)?;
    log_event_with_fields(
        Event::RecordsInserted,
        &[("model", &model), ("count", &inserted.to_string())],
    );

    Ok((StatusCode::ACCEPTED, Json(InsertResponse { inserted })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_serialization() {
        let response = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("ok"));
    }

    #[test]
    fn test_app_state_starts_empty() {
        let state = AppState::new(SchemaLoader::in_memory(), Compiler::default());
        assert_eq!(state.schemas.cached_models(), 0);
        assert_eq!(state.store.len("users").unwrap(), 0);
    }
}

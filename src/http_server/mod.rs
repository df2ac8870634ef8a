//! # HTTP Server Module
//!
//! Axum server exposing paginated listings for registered models.
//!
//! # Endpoints
//!
//! - `/health` - Health check
//! - `/api/:model` - Paginated listing (GET) and record seeding (POST)

mod config;
mod errors;
mod routes;
mod server;

pub use config::HttpServerConfig;
pub use errors::{ErrorResponse, HttpError, HttpResult};
pub use routes::{api_routes, health_routes, AppState, HealthResponse, InsertResponse};
pub use server::HttpServer;

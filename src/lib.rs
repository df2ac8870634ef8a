//! aerodb-paginate - query-string filtering, ordering and pagination
//!
//! Turns decoded HTTP query parameters into a `QueryPlan` (page bounds,
//! filter predicates, sort directives) restricted to a model's fields, then
//! drives a `QueryExecutor` for the total count and one page of rows.

pub mod cli;
pub mod compiler;
pub mod executor;
pub mod http_server;
pub mod observability;
pub mod query;
pub mod schema;

pub use compiler::{compile, Compiler, PageResult};
pub use query::{QueryPlan, RawParams};

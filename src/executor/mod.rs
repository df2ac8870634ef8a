//! Query executor subsystem for aerodb-paginate
//!
//! `QueryExecutor` is the capability the compiler drives: one count query,
//! then one narrowed data query. `InMemoryExecutor` implements it over JSON
//! records.
//!
//! # Execution Flow (in-memory)
//!
//! 1. Filter records by every predicate (AND)
//! 2. Sort by the directives, primary key first
//! 3. Skip `offset`, take `limit`

mod errors;
mod executor;
mod filters;
mod memory;
mod sorter;

pub use errors::{ExecutorError, ExecutorResult};
pub use executor::{DataQuery, QueryExecutor};
pub use filters::{like_match, PredicateFilter};
pub use memory::InMemoryExecutor;
pub use sorter::ResultSorter;

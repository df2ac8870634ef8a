//! Executor capability
//!
//! The store-facing side of pagination. Implementations own connection
//! handling and synchronization; the compiler only calls `count` and
//! `query` sequentially from the requesting thread.

use serde::Serialize;

use super::errors::ExecutorResult;
use crate::query::{FilterPredicate, QueryPlan, SortDirective};

/// The narrowed data query for one page.
///
/// Clauses are listed in the order they are declared: filters (AND-conjoined),
/// then offset/limit, then sorts. Stores apply them with their own clause
/// semantics; a SQL-like store sorts before it limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DataQuery<'a> {
    pub model: &'a str,
    pub filters: &'a [FilterPredicate],
    pub offset: u64,
    pub limit: u64,
    pub sorts: &'a [SortDirective],
}

impl<'a> DataQuery<'a> {
    /// Narrows `model` according to `plan`.
    pub fn from_plan(model: &'a str, plan: &'a QueryPlan) -> Self {
        let page_spec = plan.page_spec();
        Self {
            model,
            filters: plan.filters(),
            offset: page_spec.offset(),
            limit: page_spec.limit(),
            sorts: plan.sorts(),
        }
    }
}

/// Executes counts and narrowed queries against a backing store.
///
/// Calls are synchronous and may block. Async callers run `compile` on a
/// blocking thread (`tokio::task::spawn_blocking`), as the HTTP server does.
pub trait QueryExecutor: Send + Sync {
    /// Record type returned by data queries
    type Record: Serialize;

    /// Counts rows of `model` matching every predicate in `filters`.
    /// An empty slice counts the whole model.
    fn count(&self, model: &str, filters: &[FilterPredicate]) -> ExecutorResult<u64>;

    /// Runs the narrowed query and returns at most `query.limit` records.
    fn query(&self, query: &DataQuery<'_>) -> ExecutorResult<Vec<Self::Record>>;
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for &E {
    type Record = E::Record;

    fn count(&self, model: &str, filters: &[FilterPredicate]) -> ExecutorResult<u64> {
        (**self).count(model, filters)
    }

    fn query(&self, query: &DataQuery<'_>) -> ExecutorResult<Vec<Self::Record>> {
        (**self).query(query)
    }
}

impl<E: QueryExecutor + ?Sized> QueryExecutor for std::sync::Arc<E> {
    type Record = E::Record;

    fn count(&self, model: &str, filters: &[FilterPredicate]) -> ExecutorResult<u64> {
        (**self).count(model, filters)
    }

    fn query(&self, query: &DataQuery<'_>) -> ExecutorResult<Vec<Self::Record>> {
        (**self).query(query)
    }
}

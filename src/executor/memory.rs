//! In-memory executor
//!
//! Keeps JSON records per model behind an `RwLock`. Used by the HTTP server
//! and by tests; a production deployment plugs in a store-backed executor.

use std::collections::HashMap;
use std::sync::RwLock;

use serde_json::Value;

use super::errors::{ExecutorError, ExecutorResult};
use super::executor::{DataQuery, QueryExecutor};
use super::filters::PredicateFilter;
use super::sorter::ResultSorter;
use crate::query::FilterPredicate;

/// Executor over records held in process memory
#[derive(Debug, Default)]
pub struct InMemoryExecutor {
    /// Data store: model -> records in insertion order
    data: RwLock<HashMap<String, Vec<Value>>>,
}

impl InMemoryExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends records to `model`. Every record must be a JSON object;
    /// nothing is inserted if any of them is not.
    pub fn insert(&self, model: &str, records: Vec<Value>) -> ExecutorResult<usize> {
        if let Some(pos) = records.iter().position(|r| !r.is_object()) {
            return Err(ExecutorError::InvalidRecord(format!(
                "record {} is not a JSON object",
                pos
            )));
        }

        let mut store = self
            .data
            .write()
            .map_err(|_| ExecutorError::Unavailable("Lock poisoned".to_string()))?;

        let inserted = records.len();
        store.entry(model.to_string()).or_default().extend(records);
        Ok(inserted)
    }

    /// Number of records stored for `model`
    pub fn len(&self, model: &str) -> ExecutorResult<usize> {
        let store = self
            .data
            .read()
            .map_err(|_| ExecutorError::Unavailable("Lock poisoned".to_string()))?;
        Ok(store.get(model).map_or(0, Vec::len))
    }
}

impl QueryExecutor for InMemoryExecutor {
    type Record = Value;

    fn count(&self, model: &str, filters: &[FilterPredicate]) -> ExecutorResult<u64> {
        let store = self
            .data
            .read()
            .map_err(|_| ExecutorError::count_failed(model, "Lock poisoned"))?;

        let count = store
            .get(model)
            .map_or(0, |records| {
                records
                    .iter()
                    .filter(|r| PredicateFilter::matches(r, filters))
                    .count()
            });

        Ok(count as u64)
    }

    /// Filters, then sorts, then skips `offset` and takes `limit`.
    fn query(&self, query: &DataQuery<'_>) -> ExecutorResult<Vec<Value>> {
        let store = self
            .data
            .read()
            .map_err(|_| ExecutorError::query_failed(query.model, "Lock poisoned"))?;

        let Some(records) = store.get(query.model) else {
            return Ok(Vec::new());
        };

        let mut matching: Vec<&Value> = records
            .iter()
            .filter(|r| PredicateFilter::matches(r, query.filters))
            .collect();

        ResultSorter::sort(&mut matching, query.sorts);

        let offset = usize::try_from(query.offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(query.limit).unwrap_or(usize::MAX);

        // Only the returned window is cloned
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

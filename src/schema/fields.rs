//! Field validation
//!
//! Derives the allow-list of field names a request may filter or sort on.
//! The allow-list is a pure function of the model descriptor; callers that
//! want memoization own a `FieldCache` explicitly.

use std::collections::{HashMap, HashSet};
use std::sync::{PoisonError, RwLock};

use super::errors::SchemaResult;
use crate::observability::{log_event_with_fields, Event};

/// Schema capability: lists the store-side field names of a model.
pub trait SchemaSource: Send + Sync {
    /// Fails with `SchemaError` when the model cannot be introspected.
    fn fields_of(&self, model: &str) -> SchemaResult<Vec<String>>;
}

impl<S: SchemaSource + ?Sized> SchemaSource for &S {
    fn fields_of(&self, model: &str) -> SchemaResult<Vec<String>> {
        (**self).fields_of(model)
    }
}

impl<S: SchemaSource + ?Sized> SchemaSource for std::sync::Arc<S> {
    fn fields_of(&self, model: &str) -> SchemaResult<Vec<String>> {
        (**self).fields_of(model)
    }
}

/// Set of field names permitted in filters and sort directives.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSet(HashSet<String>);

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `field` is allowed
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains(field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Allowed names, sorted
    pub fn sorted(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.0.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<S> for FieldSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Derives the valid field set for `model`.
///
/// Introspection failures are logged and propagated unchanged.
pub fn valid_fields<S: SchemaSource + ?Sized>(source: &S, model: &str) -> SchemaResult<FieldSet> {
    match source.fields_of(model) {
        Ok(fields) => {
            let set: FieldSet = fields.into_iter().collect();
            log_event_with_fields(
                Event::FieldsResolved,
                &[("model", model), ("fields", &set.len().to_string())],
            );
            Ok(set)
        }
        Err(err) => {
            log_event_with_fields(
                Event::SchemaRejected,
                &[("model", model), ("code", err.code()), ("error", &err.to_string())],
            );
            Err(err)
        }
    }
}

/// Memoizes `fields_of` per model name.
///
/// Owned by the caller; failures are never cached.
pub struct FieldCache<S> {
    source: S,
    cache: RwLock<HashMap<String, Vec<String>>>,
}

impl<S: SchemaSource> FieldCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Number of models currently memoized
    pub fn cached_models(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Drops every memoized entry
    pub fn clear(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// The wrapped source
    pub fn inner(&self) -> &S {
        &self.source
    }
}

impl<S: SchemaSource> SchemaSource for FieldCache<S> {
    fn fields_of(&self, model: &str) -> SchemaResult<Vec<String>> {
        // The map only ever holds complete entries, so a poisoned lock is still usable
        if let Some(fields) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(model)
        {
            return Ok(fields.clone());
        }

        let fields = self.source.fields_of(model)?;
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(model.to_string(), fields.clone());
        Ok(fields)
    }
}

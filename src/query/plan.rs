//! Query plan
//!
//! The immutable result of parsing one request's parameters against a
//! model's allow-list.

use serde::Serialize;

use super::diagnostics::Diagnostics;
use super::filter::{parse_filters_with_diagnostics, FilterPredicate};
use super::order::{parse_order_by_with_diagnostics, SortDirective, ORDER_BY_KEY};
use super::pagination::{resolve_page_with_diagnostics, PageSpec};
use super::params::RawParams;
use crate::schema::FieldSet;

/// Page bounds, filters and sorts for one request.
///
/// Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QueryPlan {
    #[serde(flatten)]
    page_spec: PageSpec,
    filters: Vec<FilterPredicate>,
    sorts: Vec<SortDirective>,
}

impl QueryPlan {
    /// Builds a plan, discarding diagnostics.
    pub fn build(params: &RawParams, allowed: &FieldSet) -> Self {
        Self::build_with_diagnostics(params, allowed).0
    }

    /// Builds a plan and reports every parameter that was dropped.
    pub fn build_with_diagnostics(params: &RawParams, allowed: &FieldSet) -> (Self, Diagnostics) {
        let mut diagnostics = Diagnostics::new();

        let page_spec = resolve_page_with_diagnostics(params, &mut diagnostics);
        let filters = parse_filters_with_diagnostics(params, allowed, &mut diagnostics);
        let sorts = parse_order_by_with_diagnostics(
            params.first(ORDER_BY_KEY).unwrap_or(""),
            allowed,
            &mut diagnostics,
        );

        let plan = Self {
            page_spec,
            filters,
            sorts,
        };
        (plan, diagnostics)
    }

    pub fn page_spec(&self) -> PageSpec {
        self.page_spec
    }

    pub fn filters(&self) -> &[FilterPredicate] {
        &self.filters
    }

    pub fn sorts(&self) -> &[SortDirective] {
        &self.sorts
    }
}

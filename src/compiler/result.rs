//! Page results

use serde::Serialize;

use crate::query::{total_pages, Diagnostics, PageSpec};

/// One page of records plus totals.
///
/// Serializes as `{"items", "total", "total_pages", "page", "size"}`, plus
/// `"dropped"` when dropped parameters are reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u64,
    pub page: u64,
    pub size: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dropped: Option<Diagnostics>,
}

impl<T> PageResult<T> {
    /// Builds a result, deriving `total_pages` from `total` and the page size.
    pub fn new(items: Vec<T>, total: u64, page_spec: PageSpec) -> Self {
        Self {
            items,
            total,
            total_pages: total_pages(total, page_spec.size()),
            page: page_spec.page(),
            size: page_spec.size(),
            dropped: None,
        }
    }

    /// Attaches the parameters discarded while planning this page
    pub fn with_dropped(self, dropped: Diagnostics) -> Self {
        Self {
            dropped: Some(dropped),
            ..self
        }
    }
}

//! # Pagination Resolver
//!
//! `page` and `size` are parsed leniently: anything unusable falls back to
//! the default instead of failing the request.

use serde::Serialize;

use super::diagnostics::{Diagnostics, DropReason};
use super::params::RawParams;

/// Key carrying the 1-based page number
pub const PAGE_KEY: &str = "page";

/// Key carrying the page size
pub const SIZE_KEY: &str = "size";

/// Page used when `page` is missing or unusable
pub const DEFAULT_PAGE: u64 = 1;

/// Size used when `size` is missing or unusable
pub const DEFAULT_PAGE_SIZE: u64 = 10;

/// Largest accepted page size
pub const MAX_PAGE_SIZE: u64 = 2000;

/// Bounded page/size pair: `page >= 1`, `1 <= size <= MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageSpec {
    page: u64,
    size: u64,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageSpec {
    /// Returns `None` unless both values are within bounds.
    pub fn new(page: u64, size: u64) -> Option<Self> {
        (page >= 1 && (1..=MAX_PAGE_SIZE).contains(&size)).then_some(Self { page, size })
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Rows skipped before this page: `(page - 1) * size`
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.size)
    }

    /// Rows returned at most
    pub fn limit(&self) -> u64 {
        self.size
    }
}

/// Number of pages needed for `total` rows, rounding up. Zero when either
/// side is zero.
pub fn total_pages(total: u64, size: u64) -> u64 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(size)
}

/// Parses a strictly positive integer; anything else is "absent".
fn parse_positive(raw: &str) -> Option<u64> {
    raw.parse::<i64>()
        .ok()
        .filter(|n| *n > 0)
        .and_then(|n| u64::try_from(n).ok())
}

/// Resolves the page spec from the first `page` and `size` values.
pub fn resolve_page(params: &RawParams) -> PageSpec {
    resolve_page_with_diagnostics(params, &mut Diagnostics::new())
}

/// Resolves the page spec, recording present-but-unusable values.
pub fn resolve_page_with_diagnostics(params: &RawParams, diagnostics: &mut Diagnostics) -> PageSpec {
    let page = match params.first(PAGE_KEY) {
        None => DEFAULT_PAGE,
        Some(raw) => parse_positive(raw).unwrap_or_else(|| {
            diagnostics.drop_param(PAGE_KEY, DropReason::InvalidPagination(raw.to_string()));
            DEFAULT_PAGE
        }),
    };

    let size = match params.first(SIZE_KEY) {
        None => DEFAULT_PAGE_SIZE,
        Some(raw) => parse_positive(raw)
            .filter(|s| *s <= MAX_PAGE_SIZE)
            .unwrap_or_else(|| {
                diagnostics.drop_param(SIZE_KEY, DropReason::InvalidPagination(raw.to_string()));
                DEFAULT_PAGE_SIZE
            }),
    };

    PageSpec { page, size }
}

//! # Query parameter parsing
//!
//! Turns untrusted query-string parameters into a validated `QueryPlan`:
//!
//! - `field[_op]=value` becomes a filter predicate (`filter`)
//! - `order_by=...` becomes sort directives (`order`)
//! - `page` / `size` become bounded page bounds (`pagination`)
//!
//! Invalid input is dropped rather than rejected; `Diagnostics` says what
//! was dropped and why.

pub mod diagnostics;
pub mod filter;
pub mod order;
pub mod pagination;
pub mod params;
pub mod plan;

pub use diagnostics::{Diagnostics, DropReason, DroppedParam};
pub use filter::{parse_filters, FilterOperator, FilterPredicate, FilterValue};
pub use order::{parse_order_by, SortDirection, SortDirective};
pub use pagination::{resolve_page, total_pages, PageSpec};
pub use params::RawParams;
pub use plan::QueryPlan;

//! Query plan compiler for aerodb-paginate
//!
//! Joins the schema allow-list, the parameter parsers and an executor into
//! a single call that returns one page of results.
//!
//! `total` follows the configured `CountPolicy`. The default counts every
//! row of the model, so totals do not shrink when filters are applied.

mod compiler;
mod config;
mod errors;
mod result;

pub use compiler::{compile, Compiler};
pub use config::{CompileConfig, CountPolicy};
pub use errors::{CompileError, CompileResult};
pub use result::PageResult;

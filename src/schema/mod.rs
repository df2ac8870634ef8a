//! Schema subsystem for aerodb-paginate
//!
//! Turns a model descriptor into the allow-list of field names that
//! filters and sort directives may reference. Nothing outside this
//! allow-list ever reaches the executor.

mod errors;
mod fields;
mod loader;
mod types;

pub use errors::{SchemaError, SchemaResult};
pub use fields::{valid_fields, FieldCache, FieldSet, SchemaSource};
pub use loader::SchemaLoader;
pub use types::{FieldDef, ModelSchema};

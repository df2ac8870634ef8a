//! Model descriptors
//!
//! A model descriptor names a collection and lists its fields as they are
//! stored in the backing store. Descriptors are loaded from JSON:
//!
//! ```json
//! {
//!   "name": "users",
//!   "fields": [
//!     { "name": "id" },
//!     { "name": "accountManager", "column": "account_manager" }
//!   ]
//! }
//! ```

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A single field of a model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as declared on the model
    pub name: String,

    /// Column name in the store, when it differs from `name`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
}

impl FieldDef {
    /// A field stored under its own name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: None,
        }
    }

    /// A field stored under a different column name
    pub fn with_column(name: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column: Some(column.into()),
        }
    }

    /// Name used by the store, and therefore by filters and sorts
    pub fn store_name(&self) -> &str {
        self.column.as_deref().unwrap_or(&self.name)
    }
}

/// Model descriptor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Model (collection) name
    pub name: String,

    /// Declared fields, in declaration order
    pub fields: Vec<FieldDef>,
}

impl ModelSchema {
    pub fn new(name: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// Store-side names of all fields, in declaration order
    pub fn field_names(&self) -> Vec<String> {
        self.fields
            .iter()
            .map(|f| f.store_name().to_string())
            .collect()
    }

    /// Validates the structure of the descriptor.
    ///
    /// A descriptor needs a name and at least one field; store names must be
    /// non-empty and unique.
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("model name cannot be empty".to_string());
        }

        if self.fields.is_empty() {
            return Err(format!("model '{}' declares no fields", self.name));
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            let store_name = field.store_name();
            if store_name.is_empty() {
                return Err(format!("model '{}' has a field with an empty name", self.name));
            }
            if !seen.insert(store_name) {
                return Err(format!(
                    "model '{}' declares field '{}' more than once",
                    self.name, store_name
                ));
            }
        }

        Ok(())
    }
}

//! Schema loader
//!
//! Reads model descriptors from `*.json` files in a directory and keeps
//! them in an in-memory registry keyed by model name. The loader is the
//! crate's default `SchemaSource`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::fields::SchemaSource;
use super::types::ModelSchema;

/// Registry of model descriptors, optionally backed by a directory.
#[derive(Debug, Default)]
pub struct SchemaLoader {
    /// Directory containing descriptor files
    schema_dir: Option<PathBuf>,
    /// Loaded descriptors indexed by model name
    schemas: HashMap<String, ModelSchema>,
}

impl SchemaLoader {
    /// Creates an empty registry with no backing directory.
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Creates a loader for the given schema directory. Nothing is read
    /// until `load_all` is called.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: Some(schema_dir.to_path_buf()),
            schemas: HashMap::new(),
        }
    }

    /// Loads every descriptor file from the schema directory.
    ///
    /// Non-JSON files are skipped. A missing directory is treated as empty.
    /// Any unreadable or malformed descriptor fails the whole load.
    pub fn load_all(&mut self) -> SchemaResult<usize> {
        let Some(dir) = self.schema_dir.clone() else {
            return Ok(0);
        };

        if !dir.exists() {
            return Ok(0);
        }

        let entries = fs::read_dir(&dir).map_err(|e| {
            SchemaError::malformed_schema(
                dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;

            let path = entry.path();
            if path.extension().map_or(true, |ext| ext != "json") {
                continue;
            }
            paths.push(path);
        }

        // Directory iteration order is platform dependent
        paths.sort();

        for path in &paths {
            self.load_schema_file(path)?;
        }

        Ok(paths.len())
    }

    /// Loads a single descriptor file.
    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let schema: ModelSchema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(path.display().to_string(), e))?;

        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::schema_immutable(&schema.name));
        }

        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Registers a descriptor directly.
    pub fn register(&mut self, schema: ModelSchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema("<in-memory>", e))?;

        if self.schemas.contains_key(&schema.name) {
            return Err(SchemaError::schema_immutable(&schema.name));
        }

        self.schemas.insert(schema.name.clone(), schema);
        Ok(())
    }

    /// Gets a descriptor by model name.
    pub fn get(&self, model: &str) -> Option<&ModelSchema> {
        self.schemas.get(model)
    }

    /// Registered model names, sorted.
    pub fn model_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.schemas.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Returns the number of registered models.
    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Writes a descriptor to `<schema_dir>/<model>.json`.
    pub fn save_schema(&self, schema: &ModelSchema) -> SchemaResult<PathBuf> {
        let dir = self.schema_dir.as_ref().ok_or_else(|| {
            SchemaError::malformed_schema("<in-memory>", "Loader has no schema directory")
        })?;

        let path = dir.join(format!("{}.json", schema.name));
        if path.exists() {
            return Err(SchemaError::schema_immutable(&schema.name));
        }

        fs::create_dir_all(dir).map_err(|e| {
            SchemaError::malformed_schema(
                dir.display().to_string(),
                format!("Failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }
}

impl SchemaSource for SchemaLoader {
    fn fields_of(&self, model: &str) -> SchemaResult<Vec<String>> {
        self.get(model)
            .map(ModelSchema::field_names)
            .ok_or_else(|| SchemaError::unknown_model(model))
    }
}

//! Compile Round-Trip Tests
//!
//! Descriptors are loaded from disk, records live in the in-memory
//! executor, and every request goes through `Compiler::compile`.

use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::{json, Value};
use tempfile::TempDir;

use aerodb_paginate::compiler::{compile, CompileConfig, CompileError, Compiler};
use aerodb_paginate::executor::{
    DataQuery, ExecutorError, ExecutorResult, InMemoryExecutor, QueryExecutor,
};
use aerodb_paginate::query::{FilterPredicate, RawParams};
use aerodb_paginate::schema::{
    FieldCache, FieldDef, ModelSchema, SchemaError, SchemaLoader, SchemaResult, SchemaSource,
};

// =============================================================================
// FIXTURES
// =============================================================================

fn users_schema() -> ModelSchema {
    ModelSchema::new(
        "users",
        vec![
            FieldDef::new("name"),
            FieldDef::new("age"),
            FieldDef::new("balance"),
            FieldDef::new("account_manager"),
        ],
    )
}

/// Writes the users descriptor into a fresh directory and loads it back.
fn load_users() -> (TempDir, SchemaLoader) {
    let temp_dir = TempDir::new().unwrap();
    SchemaLoader::new(temp_dir.path())
        .save_schema(&users_schema())
        .unwrap();

    let mut loader = SchemaLoader::new(temp_dir.path());
    assert_eq!(loader.load_all().unwrap(), 1);
    (temp_dir, loader)
}

fn seeded_store(rows: usize) -> InMemoryExecutor {
    let store = InMemoryExecutor::new();
    let records: Vec<Value> = (0..rows)
        .map(|i| {
            json!({
                "name": format!("user-{:02}", i),
                "age": 18 + i,
                "balance": i * 100,
                "account_manager": if i % 2 == 0 { "zhangsi" } else { "lisi" },
            })
        })
        .collect();
    store.insert("users", records).unwrap();
    store
}

fn names(items: &[Value]) -> Vec<&str> {
    items.iter().filter_map(|v| v["name"].as_str()).collect()
}

// =============================================================================
// PAGINATION
// =============================================================================

#[test]
fn first_page_of_twenty_five_rows() {
    let (_dir, schemas) = load_users();
    let store = seeded_store(25);

    let result = compile("users", &RawParams::new(), &schemas, &store).unwrap();

    assert_eq!(result.items.len(), 10);
    assert_eq!(result.total, 25);
    assert_eq!(result.total_pages, 3);
    assert_eq!(result.page, 1);
    assert_eq!(result.size, 10);
}

#[test]
fn last_page_is_partial() {
    let (_dir, schemas) = load_users();
    let store = seeded_store(25);

    let params = RawParams::from_query_string("page=3");
    let result = compile("users", &params, &schemas, &store).unwrap();

    assert_eq!(names(&result.items), vec!["user-20", "user-21", "user-22", "user-23", "user-24"]);
}

#[test]
fn page_past_the_end_is_empty() {
    let (_dir, schemas) = load_users();
    let store = seeded_store(25);

    let params = RawParams::from_query_string("page=9");
    let result = compile("users", &params, &schemas, &store).unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.total, 25);
    assert_eq!(result.page, 9);
}

#[test]
fn empty_model_has_zero_pages() {
    let (_dir, schemas) = load_users();
    let store = InMemoryExecutor::new();

    let result = compile("users", &RawParams::new(), &schemas, &store).unwrap();

    assert!(result.items.is_empty());
    assert_eq!(result.total, 0);
    assert_eq!(result.total_pages, 0);
}

#[test]
fn repeated_compiles_are_identical() {
    let (_dir, schemas) = load_users();
    let store = seeded_store(40);
    let params = RawParams::from_query_string("page=2&size=7&age_gte=20&order_by=-balance");

    let first = serde_json::to_value(compile("users", &params, &schemas, &store).unwrap()).unwrap();
    let second = serde_json::to_value(compile("users", &params, &schemas, &store).unwrap()).unwrap();

    assert_eq!(first, second);
}

// =============================================================================
// FILTERS, SORTS AND COUNT POLICY
// =============================================================================

#[test]
fn filters_and_sorts_shape_the_page() {
    let (_dir, schemas) = load_users();
    let store = seeded_store(25);

    let params =
        RawParams::from_query_string("account_manager_in=lisi&age_lt=30&order_by=-age&size=3");
    let result = compile("users", &params, &schemas, &store).unwrap();

    // lisi manages odd rows; age < 30 keeps rows 1, 3, 5, 7, 9, 11
    assert_eq!(names(&result.items), vec!["user-11", "user-09", "user-07"]);
}

#[test]
fn unfiltered_count_ignores_filters() {
    let (_dir, schemas) = load_users();
    let store = seeded_store(25);

    let params = RawParams::from_query_string("age_gte=40");
    let result = compile("users", &params, &schemas, &store).unwrap();

    assert_eq!(result.items.len(), 3);
    assert_eq!(result.total, 25);
    assert_eq!(result.total_pages, 3);
}

#[test]
fn filtered_count_matches_rows() {
    let (_dir, schemas) = load_users();
    let store = seeded_store(25);
    let compiler = Compiler::new(CompileConfig::filtered_count());

    let params = RawParams::from_query_string("age_gte=40");
    let result = compiler.compile("users", &params, &schemas, &store).unwrap();

    assert_eq!(result.items.len(), 3);
    assert_eq!(result.total, 3);
    assert_eq!(result.total_pages, 1);
}

#[test]
fn dropped_params_do_not_narrow_results() {
    let (_dir, schemas) = load_users();
    let store = seeded_store(12);

    let params = RawParams::from_query_string("secret_eq=x&age_between=1,5&size=20");
    let result = compile("users", &params, &schemas, &store).unwrap();

    assert_eq!(result.items.len(), 12);
}

// =============================================================================
// ERRORS
// =============================================================================

#[test]
fn unknown_model_is_a_schema_error() {
    let (_dir, schemas) = load_users();
    let store = seeded_store(3);

    let err = compile("orders", &RawParams::new(), &schemas, &store).unwrap_err();
    assert!(matches!(
        err,
        CompileError::Schema(SchemaError::UnknownModel(ref m)) if m == "orders"
    ));
    assert_eq!(err.code(), "AERO_UNKNOWN_MODEL");
}

struct FailingExecutor {
    fail_count: bool,
    queries: AtomicUsize,
}

impl QueryExecutor for FailingExecutor {
    type Record = Value;

    fn count(&self, model: &str, _filters: &[FilterPredicate]) -> ExecutorResult<u64> {
        if self.fail_count {
            Err(ExecutorError::count_failed(model, "connection reset"))
        } else {
            Ok(5)
        }
    }

    fn query(&self, query: &DataQuery<'_>) -> ExecutorResult<Vec<Value>> {
        self.queries.fetch_add(1, Ordering::SeqCst);
        Err(ExecutorError::query_failed(query.model, "timeout"))
    }
}

#[test]
fn count_failure_skips_the_data_query() {
    let (_dir, schemas) = load_users();
    let executor = FailingExecutor {
        fail_count: true,
        queries: AtomicUsize::new(0),
    };

    let err = compile("users", &RawParams::new(), &schemas, &executor).unwrap_err();

    assert!(matches!(err, CompileError::Executor(ExecutorError::CountFailed { .. })));
    assert_eq!(executor.queries.load(Ordering::SeqCst), 0);
}

#[test]
fn query_failure_is_surfaced() {
    let (_dir, schemas) = load_users();
    let executor = FailingExecutor {
        fail_count: false,
        queries: AtomicUsize::new(0),
    };

    let err = compile("users", &RawParams::new(), &schemas, &executor).unwrap_err();

    assert!(matches!(err, CompileError::Executor(ExecutorError::QueryFailed { .. })));
    assert_eq!(executor.queries.load(Ordering::SeqCst), 1);
}

// =============================================================================
// SCHEMA SOURCES
// =============================================================================

struct CountingLoader {
    inner: SchemaLoader,
    lookups: AtomicUsize,
}

impl SchemaSource for CountingLoader {
    fn fields_of(&self, model: &str) -> SchemaResult<Vec<String>> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.fields_of(model)
    }
}

#[test]
fn field_cache_introspects_once_per_model() {
    let (_dir, loader) = load_users();
    let cache = FieldCache::new(CountingLoader {
        inner: loader,
        lookups: AtomicUsize::new(0),
    });
    let store = seeded_store(5);

    for _ in 0..3 {
        compile("users", &RawParams::new(), &cache, &store).unwrap();
    }

    assert_eq!(cache.inner().lookups.load(Ordering::SeqCst), 1);
    assert_eq!(cache.cached_models(), 1);
}

#[test]
fn malformed_descriptor_is_rejected_on_load() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(temp_dir.path().join("broken.json"), "{ \"name\": ").unwrap();

    let mut loader = SchemaLoader::new(temp_dir.path());
    let err = loader.load_all().unwrap_err();
    assert_eq!(err.code(), "AERO_MALFORMED_SCHEMA");
}

#[test]
fn column_names_are_the_valid_fields() {
    let temp_dir = TempDir::new().unwrap();
    let schema = ModelSchema::new(
        "accounts",
        vec![FieldDef::new("id"), FieldDef::with_column("accountManager", "manager")],
    );
    SchemaLoader::new(temp_dir.path()).save_schema(&schema).unwrap();

    let mut loader = SchemaLoader::new(temp_dir.path());
    loader.load_all().unwrap();

    let store = InMemoryExecutor::new();
    store
        .insert("accounts", vec![json!({"id": 1, "manager": "lisi"}), json!({"id": 2, "manager": "wangwu"})])
        .unwrap();

    let params = RawParams::from_query_string("manager=lisi&accountManager=wangwu");
    let result = compile("accounts", &params, &loader, &store).unwrap();

    assert_eq!(result.items, vec![json!({"id": 1, "manager": "lisi"})]);
}

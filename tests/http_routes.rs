//! HTTP Route Tests
//!
//! Drives the full router with `tower::ServiceExt::oneshot`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use aerodb_paginate::compiler::{CompileConfig, Compiler};
use aerodb_paginate::http_server::{AppState, HttpServer, HttpServerConfig};
use aerodb_paginate::schema::{FieldDef, ModelSchema, SchemaLoader};

fn app_with(config: CompileConfig) -> (Router, Arc<AppState>) {
    let mut schemas = SchemaLoader::in_memory();
    schemas
        .register(ModelSchema::new(
            "users",
            vec![
                FieldDef::new("name"),
                FieldDef::new("age"),
                FieldDef::new("balance"),
                FieldDef::new("account_manager"),
            ],
        ))
        .unwrap();

    let state = Arc::new(AppState::new(schemas, Compiler::new(config)));
    let router = HttpServer::with_state(HttpServerConfig::default(), Arc::clone(&state)).router();
    (router, state)
}

fn app() -> (Router, Arc<AppState>) {
    app_with(CompileConfig::default())
}

fn seed(state: &AppState, rows: usize) {
    let records = (0..rows)
        .map(|i| json!({"name": format!("user-{:03}", i), "age": 20 + (i % 50), "balance": i}))
        .collect();
    state.store.insert("users", records).unwrap();
}

async fn send(router: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header("content-type", "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn health_reports_ok() {
    let (router, _) = app();
    let (status, body) = send(router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn list_returns_page_result() {
    let (router, state) = app();
    seed(&state, 100);

    let (status, body) = send(router, Method::GET, "/api/users?page=2&size=15", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 100);
    assert_eq!(body["total_pages"], 7);
    assert_eq!(body["page"], 2);
    assert_eq!(body["size"], 15);
    assert_eq!(body["items"].as_array().unwrap().len(), 15);
    assert_eq!(body["items"][0]["name"], "user-015");
}

#[tokio::test]
async fn list_applies_filters_and_order() {
    let (router, state) = app();
    seed(&state, 100);

    let (status, body) = send(
        router,
        Method::GET,
        "/api/users?age_gte=68&name_like=user-0%25&order_by=-balance&size=5",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["items"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|item| item["name"].as_str())
        .collect();
    // age = 20 + i % 50 >= 68 keeps i in {48, 49, 98, 99}
    assert_eq!(names, vec!["user-099", "user-098", "user-049", "user-048"]);
}

#[tokio::test]
async fn filtered_count_policy_narrows_total() {
    let (router, state) = app_with(CompileConfig::filtered_count());
    seed(&state, 100);

    let (_, body) = send(router, Method::GET, "/api/users?age_gte=68", None).await;

    assert_eq!(body["total"], 4);
    assert_eq!(body["total_pages"], 1);
}

#[tokio::test]
async fn dropped_params_hidden_by_default() {
    let (router, state) = app();
    seed(&state, 5);

    let (_, body) = send(router, Method::GET, "/api/users?secret_eq=x", None).await;
    assert!(body.get("dropped").is_none());
}

#[tokio::test]
async fn dropped_params_reported_when_enabled() {
    let (router, state) = app_with(CompileConfig::default().reporting_dropped());
    seed(&state, 5);

    let (status, body) = send(
        router,
        Method::GET,
        "/api/users?secret_eq=x&age_between=1,5&page=abc",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["items"].as_array().unwrap().len(), 5);
    assert_eq!(
        body["dropped"],
        json!([
            {"key": "page", "reason": "invalid_pagination", "detail": "abc"},
            {"key": "secret_eq", "reason": "unknown_field", "detail": "secret"},
            {"key": "age_between", "reason": "unknown_operator", "detail": "between"},
        ])
    );
}

#[tokio::test]
async fn unknown_model_is_not_found() {
    let (router, _) = app();
    let (status, body) = send(router, Method::GET, "/api/orders", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 404);
    assert!(body["error"].as_str().unwrap().contains("orders"));
}

#[tokio::test]
async fn insert_accepts_array_and_object() {
    let (router, state) = app();

    let (status, body) = send(
        router.clone(),
        Method::POST,
        "/api/users",
        Some(json!([{"name": "a", "age": 30}, {"name": "b", "age": 31}])),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["inserted"], 2);

    let (status, body) = send(
        router,
        Method::POST,
        "/api/users",
        Some(json!({"name": "c", "age": 32})),
    )
    .await;
    assert_eq!(status, StatusCode::ACCEPTED);
    assert_eq!(body["inserted"], 1);

    assert_eq!(state.store.len("users").unwrap(), 3);
}

#[tokio::test]
async fn insert_rejects_non_objects() {
    let (router, state) = app();

    let (status, _) = send(router.clone(), Method::POST, "/api/users", Some(json!(42))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        router,
        Method::POST,
        "/api/users",
        Some(json!([{"name": "ok"}, "not an object"])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(state.store.len("users").unwrap(), 0);
}

#[tokio::test]
async fn insert_into_unknown_model_is_not_found() {
    let (router, _) = app();
    let (status, _) = send(router, Method::POST, "/api/orders", Some(json!([]))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

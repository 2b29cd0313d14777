#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use deadpool_sqlite::Pool;
use serde::de::DeserializeOwned;
use serde_json::Value;
use server::{db, routes, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

/// Migrated database in a throwaway directory. The directory is removed when
/// the returned `TempDir` is dropped
pub fn create_test_pool() -> (TempDir, Pool) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("test.sqlite");
    let path = path.to_str().expect("Temp path is not utf-8");

    db::run_migrations(path).expect("Failed to run migrations");
    let pool = db::create_pool(path).expect("Failed to create pool");
    (temp_dir, pool)
}

pub fn sqlite_app() -> (TempDir, Router) {
    let (temp_dir, pool) = create_test_pool();
    (temp_dir, routes::router(AppState::sqlite(pool), routes::DEFAULT_BODY_LIMIT_BYTES))
}

pub fn memory_app() -> Router {
    routes::router(AppState::in_memory(), routes::DEFAULT_BODY_LIMIT_BYTES)
}

pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!("Response is not the expected json ({e}): {}", self.text())
        })
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        },
        None => Body::empty(),
    };
    send_request(app, builder.body(body).expect("Failed to build request")).await
}

pub async fn send_request(app: &Router, request: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(request).await.expect("Failed to execute request");

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body")
        .to_vec();

    TestResponse { status, content_type, body }
}

pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::GET, uri, None).await
}

pub async fn post(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put(app: &Router, uri: &str, body: Value) -> TestResponse {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: &Router, uri: &str) -> TestResponse {
    send(app, Method::DELETE, uri, None).await
}

/// Common test utilities for itemshop integration tests
///
/// Shared setup for the integration test binaries: an application backed by
/// an isolated in-memory database, and helpers for building requests and
/// reading responses.

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use itemshop::{create_app, db::{init_pool, DbPool}, run_migrations};
use serde_json::Value;
use std::sync::Arc;
use tower::Service;

#[allow(dead_code)]
pub const BOUNDARY: &str = "itemshop-test-boundary";

/// Creates a pool over a fresh shared-cache in-memory database with the schema applied
#[allow(dead_code)]
pub fn create_test_pool() -> Arc<DbPool> {
    let database_url = format!("file:it_{}?mode=memory&cache=shared", uuid::Uuid::new_v4());
    let pool = init_pool(&database_url).unwrap();

    let conn = &mut pool.get().unwrap();
    run_migrations(conn).unwrap();

    Arc::new(pool)
}

/// Creates a test application with an in-memory SQLite database
#[allow(dead_code)]
pub fn create_test_app() -> Router {
    create_app(create_test_pool())
}

/// Sends a request and returns the status and the body parsed as JSON
///
/// An empty body comes back as `Value::Null`.
#[allow(dead_code)]
pub async fn send(app: &mut Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.call(request).await.unwrap();
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).method("GET").body(Body::empty()).unwrap()
}

#[allow(dead_code)]
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .method(method)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

/// One part of a hand-built multipart body
#[allow(dead_code)]
pub enum Part<'a> {
    File {
        name: &'a str,
        filename: &'a str,
        content_type: &'a str,
        data: &'a [u8],
    },
    Text {
        name: &'a str,
        value: &'a str,
    },
}

/// Builds a `multipart/form-data` POST request from the given parts
#[allow(dead_code)]
pub fn multipart_request(uri: &str, parts: &[Part<'_>]) -> Request<Body> {
    let mut body: Vec<u8> = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part {
            Part::File { name, filename, content_type, data } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                        name, filename, content_type
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n{}", name, value).as_bytes(),
                );
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());

    Request::builder()
        .uri(uri)
        .method("POST")
        .header("Content-Type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(body))
        .unwrap()
}

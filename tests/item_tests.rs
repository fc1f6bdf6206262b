/// Integration tests for the item endpoints
///
/// Covers lookups against the fake store, the item schema in and out,
/// listing with common query parameters and the header-guarded listing.

use axum::{body::Body, http::{Request, StatusCode}};
use serde_json::json;

mod common;
use common::*;

#[tokio::test]
async fn test_read_item_found_and_missing() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, get("/items/foo")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"item": "The Foo Wrestlers"}));

    let (status, body) = send(&mut app, get("/items/bar")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"detail": "Item not found"}));
}

#[tokio::test]
async fn test_create_item_by_query_name() {
    let mut app = create_test_app();

    let request = Request::builder()
        .uri("/item/?name=Widget")
        .method("POST")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&mut app, request).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body, json!({"name": "Widget"}));
}

#[tokio::test]
async fn test_valid_item_round_trips() {
    let mut app = create_test_app();
    let item = json!({
        "name": "Foo",
        "description": "A very nice Item",
        "price": 35.4,
        "tax": 3.2,
        "tags": ["metal", "band"],
        "images": [
            {"url": "http://example.com/baz.jpg", "name": "The Foo live"},
            {"url": "http://example.com/dave.jpg", "name": "The Baz"}
        ]
    });

    let (status, body) = send(&mut app, json_request("POST", "/items/three/", &item)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Foo");
    assert_eq!(body["description"], "A very nice Item");
    assert_eq!(body["price"], 35.4);
    assert_eq!(body["tax"], 3.2);
    assert_eq!(body["tags"], json!(["band", "metal"]));
    assert_eq!(body["images"], item["images"]);
}

#[tokio::test]
async fn test_item_with_zero_price_is_rejected() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, json_request("POST", "/items/three/", &json!({
        "name": "Freebie",
        "price": 0
    }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], json!([{
        "loc": ["body", "price"],
        "msg": "ensure this value is greater than 0",
        "type": "value_error.range"
    }]));
}

#[tokio::test]
async fn test_item_reports_every_violation() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, json_request("POST", "/items/three/", &json!({
        "name": "Loud",
        "description": "x".repeat(301),
        "price": -5,
        "images": [{"url": "nope", "name": "broken"}]
    }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let locs: Vec<_> = body["detail"].as_array().unwrap().iter().map(|e| e["loc"].clone()).collect();
    assert_eq!(locs, vec![
        json!(["body", "description"]),
        json!(["body", "images", 0, "url"]),
        json!(["body", "price"]),
    ]);
}

#[tokio::test]
async fn test_item_missing_price_is_rejected() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, json_request("POST", "/items/three/", &json!({"name": "x"}))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], json!([{
        "loc": ["body", "price"],
        "msg": "field required",
        "type": "value_error.missing"
    }]));
}

#[tokio::test]
async fn test_item_reports_missing_and_constraint_errors_together() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, json_request("POST", "/items/three/", &json!({
        "price": -1.0,
        "description": "d".repeat(301)
    }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], json!([
        {"loc": ["body", "description"], "msg": "ensure this value has at most 300 characters", "type": "value_error.length"},
        {"loc": ["body", "name"], "msg": "field required", "type": "value_error.missing"},
        {"loc": ["body", "price"], "msg": "ensure this value is greater than 0", "type": "value_error.range"}
    ]));
}

#[tokio::test]
async fn test_item_reports_each_type_mismatch() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, json_request("POST", "/items/three/", &json!({
        "name": 7,
        "price": "cheap",
        "tax": "none",
        "tags": ["ok", 3],
        "images": [{"url": "https://example.com/a.png"}, "not an image"]
    }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let entries: Vec<_> = body["detail"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| (e["loc"].clone(), e["type"].clone()))
        .collect();
    assert_eq!(entries, vec![
        (json!(["body", "images", 0, "name"]), json!("value_error.missing")),
        (json!(["body", "images", 1]), json!("type_error.dict")),
        (json!(["body", "name"]), json!("type_error.str")),
        (json!(["body", "price"]), json!("type_error.float")),
        (json!(["body", "tags", 1]), json!("type_error.str")),
        (json!(["body", "tax"]), json!("type_error.float")),
    ]);
}

#[tokio::test]
async fn test_item_rejects_non_http_image_urls() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, json_request("POST", "/items/three/", &json!({
        "name": "Poster",
        "price": 5.0,
        "images": [
            {"url": "javascript:alert(1)", "name": "a"},
            {"url": "ftp://h/a", "name": "b"},
            {"url": "https://example.com/c.png", "name": "c"}
        ]
    }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let locs: Vec<_> = body["detail"].as_array().unwrap().iter().map(|e| e["loc"].clone()).collect();
    assert_eq!(locs, vec![
        json!(["body", "images", 0, "url"]),
        json!(["body", "images", 1, "url"]),
    ]);
}

#[tokio::test]
async fn test_update_item_embeds_body() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, json_request("PUT", "/items/42", &json!({
        "item": {"name": "Bar", "price": 12.5, "extra": "ignored"}
    }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({
        "item_id": 42,
        "item": {
            "name": "Bar",
            "description": null,
            "price": 12.5,
            "tax": null,
            "tags": [],
            "images": null
        }
    }));
}

#[tokio::test]
async fn test_list_items_pages_fake_db() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, get("/items/?skip=1")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"items": [{"item_name": "Bar"}, {"item_name": "Baz"}]}));

    let (_, body) = send(&mut app, get("/items/?q=abc&skip=5")).await;
    assert_eq!(body, json!({"q": "abc", "items": []}));
}

#[tokio::test]
async fn test_items_one_with_valid_headers() {
    let mut app = create_test_app();

    let request = Request::builder()
        .uri("/items/one/")
        .header("X-Token", "fake-super-secret-token")
        .header("X-Key", "fake-super-secret-key")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&mut app, request).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([{"item": "Foo"}, {"item": "Bar"}]));
}

#[tokio::test]
async fn test_items_one_with_wrong_token() {
    let mut app = create_test_app();

    let request = Request::builder()
        .uri("/items/one/")
        .header("X-Token", "wrong")
        .header("X-Key", "fake-super-secret-key")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&mut app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "X-Token header invalid"}));
}

#[tokio::test]
async fn test_items_one_with_wrong_key() {
    let mut app = create_test_app();

    let request = Request::builder()
        .uri("/items/one/")
        .header("X-Token", "fake-super-secret-token")
        .header("X-Key", "wrong")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(&mut app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"detail": "X-Key header invalid"}));
}

#[tokio::test]
async fn test_items_one_without_headers() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, get("/items/one/")).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"][0]["loc"], json!(["header", "x-token"]));
}

#[tokio::test]
async fn test_items_four_fills_defaults() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, get("/items/four/")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[1], json!({
        "name": "Plumbus",
        "description": null,
        "price": 32.0,
        "tax": null,
        "tags": [],
        "images": null
    }));
}

#[tokio::test]
async fn test_unicorns() {
    let mut app = create_test_app();

    let (status, body) = send(&mut app, get("/unicorns/yolo")).await;
    assert_eq!(status.as_u16(), 418);
    assert_eq!(body["message"], "Oops! yolo did something. There goes a rainbow...");

    let (status, body) = send(&mut app, get("/unicorns/rainbow")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"unicorn_name": "rainbow"}));
}

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::{Value, json};
use shortlink::routes::router;
use std::time::Duration;

#[tokio::test]
async fn test_shorten_returns_created_link() {
    let state = common::create_test_state();
    let server = TestServer::new(router(state.clone())).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/some/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    let code = body["short_code"].as_str().unwrap();
    assert_eq!(code.len(), 3);
    assert_eq!(body["long_url"], "https://example.com/some/page");
    assert_eq!(body["short_url"], format!("{}/{}", common::BASE_URL, code));
    assert!(body.get("expires_at").is_none());

    assert_eq!(state.link_repository.len(), 1);
}

#[tokio::test]
async fn test_shorten_reports_expiry_when_ttl_set() {
    let state = common::create_test_state_with(Duration::from_secs(3600), None, false);
    let server = TestServer::new(router(state)).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body: Value = response.json();
    let expires_at = body["expires_at"].as_str().unwrap();
    assert!(chrono::DateTime::parse_from_rfc3339(expires_at).is_ok());
}

#[tokio::test]
async fn test_shorten_rejects_invalid_url() {
    let state = common::create_test_state();
    let server = TestServer::new(router(state.clone())).unwrap();

    let response = server
        .post("/shorten")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"]["fields"], json!(["url"]));
    assert!(state.link_repository.is_empty());
}

#[tokio::test]
async fn test_shorten_rejects_empty_url() {
    let state = common::create_test_state();
    let server = TestServer::new(router(state)).unwrap();

    let response = server.post("/shorten").json(&json!({ "url": "" })).await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_shorten_twice_gives_distinct_codes() {
    let state = common::create_test_state();
    let server = TestServer::new(router(state.clone())).unwrap();

    let first: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await
        .json();
    let second: Value = server
        .post("/shorten")
        .json(&json!({ "url": "https://example.com/b" }))
        .await
        .json();

    assert_ne!(first["short_code"], second["short_code"]);
    assert_eq!(state.link_repository.len(), 2);
}

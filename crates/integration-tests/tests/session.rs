//! Session token handling and health endpoints.

#![allow(clippy::unwrap_used)]

use axum::{
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use duka_kuu_integration_tests::TestApp;

#[tokio::test]
async fn test_session_cookie_is_accepted() {
    let app = TestApp::new();
    app.create_store("user_1", "Store One").await;

    let resp = app
        .send_with_cookie(Method::GET, "/api/stores", &TestApp::token("user_1"))
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json().as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_expired_token_counts_as_no_session() {
    let app = TestApp::new();
    let expired = TestApp::token_expiring_at("user_1", chrono::Utc::now().timestamp() - 3600);

    let resp = app
        .send_with_cookie(Method::GET, "/api/stores", &expired)
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body, "Unauthenticated.");
}

#[tokio::test]
async fn test_garbage_bearer_token_counts_as_no_session() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/stores")
        .header(header::AUTHORIZATION, "Bearer not-a-jwt")
        .body(Body::empty())
        .unwrap();

    let resp = app.send_request(request).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_invalid_json_body_is_bad_request() {
    let app = TestApp::new();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/stores")
        .header(header::AUTHORIZATION, format!("Bearer {}", TestApp::token("user_1")))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let resp = app.send_request(request).await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "Invalid request body.");
}

#[tokio::test]
async fn test_health_endpoints() {
    let app = TestApp::new();

    let resp = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.body, "ok");

    let resp = app.send(Method::GET, "/health/ready", None, None).await;
    assert_eq!(resp.status, StatusCode::OK);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let app = TestApp::new();
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", "req-123")
        .body(Body::empty())
        .unwrap();

    let resp = app.send_request(request).await;
    assert_eq!(resp.headers["x-request-id"], "req-123");
}

#[tokio::test]
async fn test_request_id_is_generated() {
    let app = TestApp::new();
    let resp = app.send(Method::GET, "/health", None, None).await;
    assert!(!resp.headers["x-request-id"].is_empty());
}

#[tokio::test]
async fn test_oversized_request_id_is_replaced() {
    let app = TestApp::new();
    let oversized = "r".repeat(200);
    let request = Request::builder()
        .uri("/health")
        .header("x-request-id", oversized.as_str())
        .body(Body::empty())
        .unwrap();

    let resp = app.send_request(request).await;
    assert_ne!(resp.headers["x-request-id"], oversized.as_str());
    assert!(!resp.headers["x-request-id"].is_empty());
}

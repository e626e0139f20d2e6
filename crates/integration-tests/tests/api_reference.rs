//! The "API" usage panel routes.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use duka_kuu_integration_tests::{PUBLIC_API_URL, TestApp};
use serde_json::json;

#[tokio::test]
async fn test_reference_uses_configured_base_url() {
    let app = TestApp::new();

    let resp = app
        .send(Method::GET, "/api/store1/api-reference/products", None, None)
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    let base = format!("{PUBLIC_API_URL}/api/store1/products");
    assert_eq!(
        resp.json(),
        json!([
            { "method": "GET", "url": base, "access": "public" },
            { "method": "GET", "url": format!("{base}/{{productId}}"), "access": "public" },
            { "method": "POST", "url": base, "access": "admin" },
            { "method": "PATCH", "url": format!("{base}/{{productId}}"), "access": "admin" },
            { "method": "DELETE", "url": format!("{base}/{{productId}}"), "access": "admin" },
        ])
    );
}

#[tokio::test]
async fn test_reference_unknown_entity() {
    let app = TestApp::new();
    let resp = app
        .send(Method::GET, "/api/store1/api-reference/orders", None, None)
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_api_url() {
    let app = TestApp::new();
    let resp = app.send(Method::GET, "/api/store1/api-url", None, None).await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(
        resp.json(),
        json!({ "url": format!("{PUBLIC_API_URL}/api/store1") })
    );
}

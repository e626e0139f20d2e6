//! Store routes: settings form rename and delete.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use duka_kuu_integration_tests::TestApp;
use serde_json::json;

#[tokio::test]
async fn test_create_and_list_stores() {
    let app = TestApp::new();

    let created = app
        .send(
            Method::POST,
            "/api/stores",
            Some("user_1"),
            Some(json!({ "name": "  Duka Kuu  " })),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK);
    assert_eq!(created.json()["name"], "Duka Kuu");
    assert_eq!(created.json()["userId"], "user_1");

    app.create_store("user_2", "Someone else").await;

    let listed = app
        .send(Method::GET, "/api/stores", Some("user_1"), None)
        .await
        .json();
    let stores = listed.as_array().unwrap();
    assert_eq!(stores.len(), 1);
    assert_eq!(stores[0]["name"], "Duka Kuu");
}

#[tokio::test]
async fn test_list_stores_requires_session() {
    let app = TestApp::new();
    let resp = app.send(Method::GET, "/api/stores", None, None).await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_rename_store() {
    let app = TestApp::new();
    let store = app.create_store("user_1", "Old name").await;

    let resp = app
        .send(
            Method::PATCH,
            &format!("/api/stores/{}", store.id),
            Some("user_1"),
            Some(json!({ "name": "New name" })),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["name"], "New name");
    assert_eq!(resp.json()["id"], store.id.as_str());
}

#[tokio::test]
async fn test_rename_validation() {
    let app = TestApp::new();
    let store = app.create_store("user_1", "Old name").await;
    let uri = format!("/api/stores/{}", store.id);

    let resp = app
        .send(Method::PATCH, &uri, Some("user_1"), Some(json!({})))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "The name is required.");

    let resp = app
        .send(Method::PATCH, &uri, Some("user_1"), Some(json!({ "name": "D" })))
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "The e-commerce store must have a valid name.");
}

#[tokio::test]
async fn test_rename_by_non_owner_is_unauthorized() {
    let app = TestApp::new();
    let store = app.create_store("user_1", "Old name").await;

    let resp = app
        .send(
            Method::PATCH,
            &format!("/api/stores/{}", store.id),
            Some("user_2"),
            Some(json!({ "name": "Hijacked" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);

    let shown = app
        .send(Method::GET, &format!("/api/stores/{}", store.id), Some("user_1"), None)
        .await;
    assert_eq!(shown.json()["name"], "Old name");
}

#[tokio::test]
async fn test_show_store_of_another_user_is_not_found() {
    let app = TestApp::new();
    let store = app.create_store("user_1", "Mine").await;

    let resp = app
        .send(Method::GET, &format!("/api/stores/{}", store.id), Some("user_2"), None)
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "Store not found.");
}

#[tokio::test]
async fn test_delete_store_with_products_is_a_conflict() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    app.seed_product(&seeded, "Shirt").await;

    let resp = app
        .send(
            Method::DELETE,
            &format!("/api/stores/{}", seeded.store.id),
            Some("user_1"),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(
        resp.body,
        "Remove associated products and categories before deleting this e-commerce store."
    );
}

#[tokio::test]
async fn test_delete_empty_store() {
    let app = TestApp::new();
    let store = app.create_store("user_1", "Empty").await;
    let uri = format!("/api/stores/{}", store.id);

    let resp = app.send(Method::DELETE, &uri, Some("user_1"), None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["id"], store.id.as_str());

    let resp = app.send(Method::GET, &uri, Some("user_1"), None).await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
}

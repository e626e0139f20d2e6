//! Hero, category, size and color routes.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use duka_kuu_integration_tests::TestApp;
use serde_json::{Value, json};

#[tokio::test]
async fn test_hero_lifecycle() {
    let app = TestApp::new();
    let store = app.create_store("user_1", "Store One").await;
    let collection = format!("/api/{}/heroes", store.id);

    let created = app
        .send(
            Method::POST,
            &collection,
            Some("user_1"),
            Some(json!({ "label": "Summer sale", "imageUrl": "http://x/hero.png" })),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    let hero_id = created.json()["id"].as_str().unwrap().to_string();
    let item = format!("{collection}/{hero_id}");

    let updated = app
        .send(
            Method::PATCH,
            &item,
            Some("user_1"),
            Some(json!({ "label": "Winter sale", "imageUrl": "http://x/winter.png" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["label"], "Winter sale");

    let shown = app.send(Method::GET, &item, None, None).await.json();
    assert_eq!(shown["imageUrl"], "http://x/winter.png");

    let deleted = app.send(Method::DELETE, &item, Some("user_1"), None).await;
    assert_eq!(deleted.status, StatusCode::OK);

    let shown = app.send(Method::GET, &item, None, None).await.json();
    assert_eq!(shown, Value::Null);
}

#[tokio::test]
async fn test_hero_validation_runs_before_ownership() {
    let app = TestApp::new();
    let store = app.create_store("user_1", "Store One").await;

    let resp = app
        .send(
            Method::POST,
            &format!("/api/{}/heroes", store.id),
            Some("user_2"),
            Some(json!({ "label": "Summer" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "The image url is required.");

    let resp = app
        .send(
            Method::POST,
            &format!("/api/{}/heroes", store.id),
            Some("user_2"),
            Some(json!({ "label": "Summer", "imageUrl": "http://x/hero.png" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body, "Unauthorized.");
}

#[tokio::test]
async fn test_hero_in_use_cannot_be_deleted() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;

    let resp = app
        .send(
            Method::DELETE,
            &format!("/api/{}/heroes/{}", seeded.store.id, seeded.hero.id),
            Some("user_1"),
            None,
        )
        .await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(
        resp.body,
        "Remove all products and categories using this hero first."
    );
}

#[tokio::test]
async fn test_missing_hero_is_not_found() {
    let app = TestApp::new();
    let store = app.create_store("user_1", "Store One").await;

    let resp = app
        .send(
            Method::DELETE,
            &format!("/api/{}/heroes/missing", store.id),
            Some("user_1"),
            None,
        )
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "Hero not found.");
}

#[tokio::test]
async fn test_category_embeds_hero() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;

    let created = app
        .send(
            Method::POST,
            &format!("/api/{}/categories", seeded.store.id),
            Some("user_1"),
            Some(json!({ "name": "Trousers", "heroId": seeded.hero.id })),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    let body = created.json();
    assert_eq!(body["name"], "Trousers");
    assert_eq!(body["hero"]["label"], "Summer");

    let listed = app
        .send(
            Method::GET,
            &format!("/api/{}/categories", seeded.store.id),
            None,
            None,
        )
        .await
        .json();
    let names: Vec<&str> = listed
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Trousers", "Shirts"]);
}

#[tokio::test]
async fn test_category_requires_hero_of_same_store() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let other = app.seed_store("user_1", "Store Two").await;

    let resp = app
        .send(
            Method::POST,
            &format!("/api/{}/categories", seeded.store.id),
            Some("user_1"),
            Some(json!({ "name": "Trousers", "heroId": other.hero.id })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "The hero id does not belong to this store.");

    let resp = app
        .send(
            Method::POST,
            &format!("/api/{}/categories", seeded.store.id),
            Some("user_1"),
            Some(json!({ "name": "Trousers" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "The hero id is required.");
}

#[tokio::test]
async fn test_size_update_and_conflict() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let item = format!("/api/{}/sizes/{}", seeded.store.id, seeded.size.id);

    let updated = app
        .send(
            Method::PATCH,
            &item,
            Some("user_1"),
            Some(json!({ "name": "Large", "value": "L" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.json()["value"], "L");

    app.seed_product(&seeded, "Shirt").await;
    let resp = app.send(Method::DELETE, &item, Some("user_1"), None).await;
    assert_eq!(resp.status, StatusCode::CONFLICT);
    assert_eq!(
        resp.body,
        "Remove all products and categories using this size first."
    );
}

#[tokio::test]
async fn test_color_value_must_be_hex() {
    let app = TestApp::new();
    let store = app.create_store("user_1", "Store One").await;
    let collection = format!("/api/{}/colors", store.id);

    let resp = app
        .send(
            Method::POST,
            &collection,
            Some("user_1"),
            Some(json!({ "name": "Red", "value": "red" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "The color value must be a valid hex code.");

    let resp = app
        .send(
            Method::POST,
            &collection,
            Some("user_1"),
            Some(json!({ "name": "Red", "value": "#ff0000" })),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json()["name"], "Red");
}

#[tokio::test]
async fn test_lists_are_public_and_store_scoped() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let other = app.seed_store("user_2", "Store Two").await;

    for entity in ["heroes", "sizes", "colors"] {
        let listed = app
            .send(
                Method::GET,
                &format!("/api/{}/{entity}", seeded.store.id),
                None,
                None,
            )
            .await;
        assert_eq!(listed.status, StatusCode::OK);
        let rows = listed.json();
        let rows = rows.as_array().unwrap();
        assert_eq!(rows.len(), 1, "{entity}");
        assert_eq!(rows[0]["storeId"], seeded.store.id.as_str());
        assert_ne!(rows[0]["storeId"], other.store.id.as_str());
    }
}

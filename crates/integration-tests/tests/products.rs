//! Product routes: the store-scoped update with full image replacement.

#![allow(clippy::unwrap_used)]

use axum::http::{Method, StatusCode};
use duka_kuu_core::ProductId;
use duka_kuu_dashboard::db::Catalog;
use duka_kuu_integration_tests::{SeededStore, TestApp};
use serde_json::{Value, json};

fn shirt_body(seeded: &SeededStore) -> Value {
    json!({
        "name": "Shirt",
        "price": 20,
        "categoryId": seeded.category.category.id,
        "colorId": seeded.color.id,
        "sizeId": seeded.size.id,
        "images": [{ "url": "http://x/1.png" }],
    })
}

fn product_uri(seeded: &SeededStore, product_id: &ProductId) -> String {
    format!("/api/{}/products/{}", seeded.store.id, product_id)
}

#[tokio::test]
async fn test_owner_updates_product_and_replaces_images() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let product = app.seed_product(&seeded, "Old shirt").await;

    let resp = app
        .send(
            Method::PATCH,
            &product_uri(&seeded, &product.product.id),
            Some("user_1"),
            Some(shirt_body(&seeded)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::OK, "{}", resp.body);
    let body = resp.json();
    assert_eq!(body["name"], "Shirt");
    assert_eq!(body["price"], "20");
    assert_eq!(body["isFeatured"], false);
    assert_eq!(body["isArchived"], false);
    let images = body["images"].as_array().unwrap();
    assert_eq!(images.len(), 1);
    assert_eq!(images[0]["url"], "http://x/1.png");
    assert_eq!(body["category"]["name"], "Shirts");
    assert_eq!(body["color"]["value"], seeded.color.value.as_str());
    assert_eq!(body["color"]["value"], "#ff0000");
}

#[tokio::test]
async fn test_non_owner_gets_unauthorized_and_nothing_changes() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let product = app.seed_product(&seeded, "Old shirt").await;
    app.create_store("user_2", "Store Two").await;

    let resp = app
        .send(
            Method::PATCH,
            &product_uri(&seeded, &product.product.id),
            Some("user_2"),
            Some(shirt_body(&seeded)),
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body, "Unauthorized.");

    let unchanged = app
        .catalog()
        .find_product(&seeded.store.id, &product.product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged, product);
}

#[tokio::test]
async fn test_missing_fields_are_rejected_without_mutation() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let product = app.seed_product(&seeded, "Old shirt").await;
    let uri = product_uri(&seeded, &product.product.id);

    let cases = [
        ("name", "The name is required."),
        ("images", "The images are required."),
        ("price", "The price is required."),
        ("categoryId", "The category id is required."),
        ("colorId", "The color id is required."),
        ("sizeId", "The size id is required."),
    ];

    for (field, message) in cases {
        let mut body = shirt_body(&seeded);
        body.as_object_mut().unwrap().remove(field);

        let resp = app
            .send(Method::PATCH, &uri, Some("user_1"), Some(body))
            .await;

        assert_eq!(resp.status, StatusCode::BAD_REQUEST, "missing {field}");
        assert_eq!(resp.body, message);
    }

    let unchanged = app
        .catalog()
        .find_product(&seeded.store.id, &product.product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged, product);
}

#[tokio::test]
async fn test_empty_image_list_is_rejected() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let product = app.seed_product(&seeded, "Old shirt").await;

    let mut body = shirt_body(&seeded);
    body["images"] = json!([]);
    let resp = app
        .send(
            Method::PATCH,
            &product_uri(&seeded, &product.product.id),
            Some("user_1"),
            Some(body),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "The images are required.");
}

#[tokio::test]
async fn test_unauthenticated_update_and_delete_are_rejected_first() {
    let app = TestApp::new();

    // Neither the store nor the product exist: the session check comes first.
    let resp = app
        .send(Method::PATCH, "/api/nope/products/nope", None, Some(json!({})))
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body, "Unauthenticated.");

    let resp = app
        .send(Method::DELETE, "/api/nope/products/nope", None, None)
        .await;
    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body, "Unauthenticated.");
}

#[tokio::test]
async fn test_repeated_update_keeps_scalars_and_regenerates_image_ids() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let product = app.seed_product(&seeded, "Old shirt").await;
    let uri = product_uri(&seeded, &product.product.id);

    let first = app
        .send(Method::PATCH, &uri, Some("user_1"), Some(shirt_body(&seeded)))
        .await
        .json();
    let second = app
        .send(Method::PATCH, &uri, Some("user_1"), Some(shirt_body(&seeded)))
        .await
        .json();

    for field in ["id", "name", "price", "categoryId", "colorId", "sizeId", "isFeatured"] {
        assert_eq!(first[field], second[field], "{field} changed");
    }
    assert_eq!(first["images"][0]["url"], second["images"][0]["url"]);
    assert_ne!(first["images"][0]["id"], second["images"][0]["id"]);
}

#[tokio::test]
async fn test_reference_from_another_store_is_rejected() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let other = app.seed_store("user_1", "Store Two").await;
    let product = app.seed_product(&seeded, "Old shirt").await;

    let mut body = shirt_body(&seeded);
    body["categoryId"] = json!(other.category.category.id);
    let resp = app
        .send(
            Method::PATCH,
            &product_uri(&seeded, &product.product.id),
            Some("user_1"),
            Some(body),
        )
        .await;

    assert_eq!(resp.status, StatusCode::BAD_REQUEST);
    assert_eq!(resp.body, "The category id does not belong to this store.");
}

#[tokio::test]
async fn test_missing_product_is_not_found_for_owner() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let uri = product_uri(&seeded, &ProductId::new("missing"));

    let resp = app
        .send(Method::PATCH, &uri, Some("user_1"), Some(shirt_body(&seeded)))
        .await;
    assert_eq!(resp.status, StatusCode::NOT_FOUND);
    assert_eq!(resp.body, "Product not found.");

    let resp = app.send(Method::GET, &uri, None, None).await;
    assert_eq!(resp.status, StatusCode::OK);
    assert_eq!(resp.json(), Value::Null);
}

#[tokio::test]
async fn test_create_list_and_delete_product() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let collection = format!("/api/{}/products", seeded.store.id);

    let mut body = shirt_body(&seeded);
    body["isFeatured"] = json!(true);
    let created = app
        .send(Method::POST, &collection, Some("user_1"), Some(body))
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    let product_id = created.json()["id"].as_str().unwrap().to_string();

    let listed = app
        .send(Method::GET, &format!("{collection}?isFeatured=true"), None, None)
        .await
        .json();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let deleted = app
        .send(
            Method::DELETE,
            &format!("{collection}/{product_id}"),
            Some("user_1"),
            None,
        )
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert!(
        app.catalog()
            .find_product(&seeded.store.id, &ProductId::new(product_id))
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn test_archived_products_are_not_listed() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let product = app.seed_product(&seeded, "Old shirt").await;

    let mut body = shirt_body(&seeded);
    body["isArchived"] = json!(true);
    let resp = app
        .send(
            Method::PATCH,
            &product_uri(&seeded, &product.product.id),
            Some("user_1"),
            Some(body),
        )
        .await;
    assert_eq!(resp.status, StatusCode::OK);

    let listed = app
        .send(
            Method::GET,
            &format!("/api/{}/products", seeded.store.id),
            None,
            None,
        )
        .await
        .json();
    assert!(listed.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_non_owner_cannot_delete_existing_product() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let product = app.seed_product(&seeded, "Old shirt").await;
    app.create_store("user_2", "Store Two").await;

    let resp = app
        .send(
            Method::DELETE,
            &product_uri(&seeded, &product.product.id),
            Some("user_2"),
            None,
        )
        .await;

    assert_eq!(resp.status, StatusCode::UNAUTHORIZED);
    assert_eq!(resp.body, "Unauthorized.");

    let still_there = app
        .catalog()
        .find_product(&seeded.store.id, &product.product.id)
        .await
        .unwrap();
    assert_eq!(still_there, Some(product));
}

#[tokio::test]
async fn test_prices_outside_stored_precision_are_rejected() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    let product = app.seed_product(&seeded, "Old shirt").await;
    let uri = product_uri(&seeded, &product.product.id);

    let cases = [
        (json!(0.001), "The price must have at most two decimal places."),
        (json!("99999999999999999999"), "The price is too large."),
    ];

    for (price, message) in cases {
        let mut body = shirt_body(&seeded);
        body["price"] = price;

        let resp = app
            .send(Method::PATCH, &uri, Some("user_1"), Some(body))
            .await;

        assert_eq!(resp.status, StatusCode::BAD_REQUEST);
        assert_eq!(resp.body, message);
    }

    let unchanged = app
        .catalog()
        .find_product(&seeded.store.id, &product.product.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged, product);
}

#[tokio::test]
async fn test_blank_filter_values_are_ignored() {
    let app = TestApp::new();
    let seeded = app.seed_store("user_1", "Store One").await;
    app.seed_product(&seeded, "Shirt").await;

    let listed = app
        .send(
            Method::GET,
            &format!("/api/{}/products?categoryId=&colorId=%20&sizeId=", seeded.store.id),
            None,
            None,
        )
        .await;

    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.json().as_array().unwrap().len(), 1);
}

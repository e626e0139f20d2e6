//! HTTP route handlers for the dashboard API.
//!
//! # Route Structure
//!
//! ```text
//! # Stores (session required)
//! GET    /api/stores                              - List the caller's stores
//! POST   /api/stores                              - Create a store
//! GET    /api/stores/{storeId}                    - Show an owned store
//! PATCH  /api/stores/{storeId}                    - Rename a store
//! DELETE /api/stores/{storeId}                    - Delete a store
//!
//! # Store catalog (GET is public, mutations need the store owner)
//! GET    /api/{storeId}/products                  - List products (filterable)
//! POST   /api/{storeId}/products                  - Create a product
//! GET    /api/{storeId}/products/{productId}      - Show a product (or null)
//! PATCH  /api/{storeId}/products/{productId}      - Update a product, replacing images
//! DELETE /api/{storeId}/products/{productId}      - Delete a product
//!
//! (same five routes for heroes, categories, sizes and colors)
//!
//! # API usage panel
//! GET    /api/{storeId}/api-reference/{entity}    - Route table for an entity
//! GET    /api/{storeId}/api-url                   - Public API base for the store
//! ```
//!
//! Mutations validate in a fixed order: session, path id, body fields,
//! store ownership, then the store-scoped write.

pub mod api_reference;
pub mod categories;
pub mod colors;
pub mod heroes;
pub mod products;
pub mod sizes;
pub mod stores;

use axum::{
    Router,
    body::Bytes,
    routing::get,
};
use serde::de::DeserializeOwned;

use duka_kuu_core::{StoreId, UserId};

use crate::error::AppError;
use crate::models::Store;
use crate::state::AppState;

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Stores
        .route("/api/stores", get(stores::index).post(stores::create))
        .route(
            "/api/stores/{store_id}",
            get(stores::show).patch(stores::update).delete(stores::delete),
        )
        // Products
        .route(
            "/api/{store_id}/products",
            get(products::index).post(products::create),
        )
        .route(
            "/api/{store_id}/products/{product_id}",
            get(products::show)
                .patch(products::update)
                .delete(products::delete),
        )
        // Heroes
        .route(
            "/api/{store_id}/heroes",
            get(heroes::index).post(heroes::create),
        )
        .route(
            "/api/{store_id}/heroes/{hero_id}",
            get(heroes::show).patch(heroes::update).delete(heroes::delete),
        )
        // Categories
        .route(
            "/api/{store_id}/categories",
            get(categories::index).post(categories::create),
        )
        .route(
            "/api/{store_id}/categories/{category_id}",
            get(categories::show)
                .patch(categories::update)
                .delete(categories::delete),
        )
        // Sizes
        .route(
            "/api/{store_id}/sizes",
            get(sizes::index).post(sizes::create),
        )
        .route(
            "/api/{store_id}/sizes/{size_id}",
            get(sizes::show).patch(sizes::update).delete(sizes::delete),
        )
        // Colors
        .route(
            "/api/{store_id}/colors",
            get(colors::index).post(colors::create),
        )
        .route(
            "/api/{store_id}/colors/{color_id}",
            get(colors::show).patch(colors::update).delete(colors::delete),
        )
        // API usage panel
        .route(
            "/api/{store_id}/api-reference/{entity}",
            get(api_reference::show),
        )
        .route("/api/{store_id}/api-url", get(api_reference::api_url))
}

// =============================================================================
// Shared validation
// =============================================================================

/// Reject a blank path id with `"The {what} is required."`.
pub(crate) fn require_id(id: &str, what: &str) -> Result<(), AppError> {
    if id.trim().is_empty() {
        return Err(AppError::BadRequest(format!("The {what} is required.")));
    }
    Ok(())
}

/// Take a required text field, rejecting missing or blank values.
pub(crate) fn require_text(value: Option<String>, what: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("The {what} is required.")))
}

/// Decode a JSON body. An empty body counts as `{}`.
///
/// Bodies are decoded inside the handler, after the session and path id have
/// been checked, so those failures take precedence over a malformed body.
pub(crate) fn parse_body<T>(body: &Bytes) -> Result<T, AppError>
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(body).map_err(|e| {
        tracing::debug!(error = %e, "Rejected request body");
        AppError::bad_request("Invalid request body.")
    })
}

/// Load the store if `user_id` owns it, otherwise [`AppError::Unauthorized`].
pub(crate) async fn authorize_store(
    state: &AppState,
    store_id: &StoreId,
    user_id: &UserId,
) -> Result<Store, AppError> {
    state
        .catalog()
        .find_owned_store(store_id, user_id)
        .await?
        .ok_or(AppError::Unauthorized)
}

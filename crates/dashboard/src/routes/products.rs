//! Product route handlers.
//!
//! Reads are public. Writes require the store owner and always send the full
//! product: scalar fields plus the complete list of image URLs.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::instrument;

use duka_kuu_core::{CategoryId, ColorId, Price, PriceError, ProductId, SizeId, StoreId};

use super::{authorize_store, parse_body, require_id, require_text};
use crate::error::AppError;
use crate::middleware::Principal;
use crate::models::{Product, ProductDetails, ProductFilter, ProductInput};
use crate::state::AppState;

const PRODUCT_NOT_FOUND: &str = "Product not found.";

/// JSON body accepted by `POST` and `PATCH`.
///
/// Every field is optional at the decoding stage so that each missing field
/// gets its own message.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductBody {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    pub category_id: Option<String>,
    pub color_id: Option<String>,
    pub size_id: Option<String>,
    pub images: Option<Vec<ImageBody>>,
    pub is_featured: Option<bool>,
    pub is_archived: Option<bool>,
}

/// One entry of the `images` array.
#[derive(Debug, Deserialize)]
pub struct ImageBody {
    pub url: String,
}

impl ProductBody {
    /// Check required fields in order and build a [`ProductInput`].
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` naming the first missing or invalid field.
    pub fn into_input(self) -> Result<ProductInput, AppError> {
        let name = require_text(self.name, "name")?;

        let image_urls: Vec<String> = self
            .images
            .unwrap_or_default()
            .into_iter()
            .map(|image| image.url.trim().to_string())
            .collect();
        if image_urls.is_empty() || image_urls.iter().any(String::is_empty) {
            return Err(AppError::bad_request("The images are required."));
        }

        // A zero price is treated like a missing one.
        let price = match self.price.map(Price::new) {
            None | Some(Err(PriceError::Zero)) => {
                return Err(AppError::bad_request("The price is required."));
            }
            Some(Err(PriceError::Negative)) => {
                return Err(AppError::bad_request(
                    "The price must be greater than zero.",
                ));
            }
            Some(Err(PriceError::TooPrecise)) => {
                return Err(AppError::bad_request(
                    "The price must have at most two decimal places.",
                ));
            }
            Some(Err(PriceError::TooLarge)) => {
                return Err(AppError::bad_request("The price is too large."));
            }
            Some(Ok(price)) => price,
        };

        let category_id = require_text(self.category_id, "category id")?;
        let color_id = require_text(self.color_id, "color id")?;
        let size_id = require_text(self.size_id, "size id")?;

        Ok(ProductInput {
            name,
            price,
            category_id: CategoryId::new(category_id),
            size_id: SizeId::new(size_id),
            color_id: ColorId::new(color_id),
            image_urls,
            is_featured: self.is_featured.unwrap_or(false),
            is_archived: self.is_archived.unwrap_or(false),
        })
    }
}

/// List a store's unarchived products.
///
/// GET /api/{storeId}/products?categoryId=&colorId=&sizeId=&isFeatured=
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
    Query(filter): Query<ProductFilter>,
) -> Result<Json<Vec<ProductDetails>>, AppError> {
    require_id(&store_id, "store id")?;

    let products = state
        .catalog()
        .list_products(&StoreId::new(store_id), &filter)
        .await?;

    Ok(Json(products))
}

/// Show one product with images, category, size and color, or `null`.
///
/// GET /api/{storeId}/products/{productId}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((store_id, product_id)): Path<(String, String)>,
) -> Result<Json<Option<ProductDetails>>, AppError> {
    require_id(&product_id, "product id")?;

    let product = state
        .catalog()
        .find_product(&StoreId::new(store_id), &ProductId::new(product_id))
        .await?;

    Ok(Json(product))
}

/// Create a product.
///
/// POST /api/{storeId}/products
#[instrument(skip(state, principal, body))]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Path(store_id): Path<String>,
    body: Bytes,
) -> Result<Json<ProductDetails>, AppError> {
    let user_id = principal.require()?;
    let input = parse_body::<ProductBody>(&body)?.into_input()?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let product = state.catalog().create_product(&store_id, &input).await?;
    tracing::info!(product_id = %product.product.id, "Product created");

    Ok(Json(product))
}

/// Update a product and replace its images.
///
/// PATCH /api/{storeId}/products/{productId}
#[instrument(skip(state, principal, body))]
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path((store_id, product_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<ProductDetails>, AppError> {
    let user_id = principal.require()?;
    require_id(&product_id, "product id")?;
    let input = parse_body::<ProductBody>(&body)?.into_input()?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let product = state
        .catalog()
        .update_product(&store_id, &ProductId::new(product_id), &input)
        .await?
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;

    Ok(Json(product))
}

/// Delete a product and its images.
///
/// DELETE /api/{storeId}/products/{productId}
#[instrument(skip(state, principal))]
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path((store_id, product_id)): Path<(String, String)>,
) -> Result<Json<Product>, AppError> {
    let user_id = principal.require()?;
    require_id(&product_id, "product id")?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let product = state
        .catalog()
        .delete_product(&store_id, &ProductId::new(product_id))
        .await?
        .ok_or_else(|| AppError::NotFound(PRODUCT_NOT_FOUND.to_string()))?;
    tracing::info!(product_id = %product.id, "Product deleted");

    Ok(Json(product))
}

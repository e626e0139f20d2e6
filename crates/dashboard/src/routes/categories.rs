//! Category route handlers.
//!
//! Responses embed the hero that promotes the category.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use duka_kuu_core::{CategoryId, HeroId, StoreId};

use super::{authorize_store, parse_body, require_id, require_text};
use crate::error::AppError;
use crate::middleware::Principal;
use crate::models::{CategoryDetails, CategoryInput};
use crate::state::AppState;

const CATEGORY_NOT_FOUND: &str = "Category not found.";

/// JSON body accepted by `POST` and `PATCH`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryBody {
    pub name: Option<String>,
    pub hero_id: Option<String>,
}

impl CategoryBody {
    fn into_input(self) -> Result<CategoryInput, AppError> {
        Ok(CategoryInput {
            name: require_text(self.name, "name")?,
            hero_id: HeroId::new(require_text(self.hero_id, "hero id")?),
        })
    }
}

/// List a store's categories, newest first.
///
/// GET /api/{storeId}/categories
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<CategoryDetails>>, AppError> {
    require_id(&store_id, "store id")?;
    let categories = state
        .catalog()
        .list_categories(&StoreId::new(store_id))
        .await?;
    Ok(Json(categories))
}

/// Show one category, or `null`.
///
/// GET /api/{storeId}/categories/{categoryId}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((store_id, category_id)): Path<(String, String)>,
) -> Result<Json<Option<CategoryDetails>>, AppError> {
    require_id(&category_id, "category id")?;
    let category = state
        .catalog()
        .find_category(&StoreId::new(store_id), &CategoryId::new(category_id))
        .await?;
    Ok(Json(category))
}

/// Create a category.
///
/// POST /api/{storeId}/categories
#[instrument(skip(state, principal, body))]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Path(store_id): Path<String>,
    body: Bytes,
) -> Result<Json<CategoryDetails>, AppError> {
    let user_id = principal.require()?;
    let input = parse_body::<CategoryBody>(&body)?.into_input()?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let category = state.catalog().create_category(&store_id, &input).await?;
    Ok(Json(category))
}

/// Update a category.
///
/// PATCH /api/{storeId}/categories/{categoryId}
#[instrument(skip(state, principal, body))]
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path((store_id, category_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<CategoryDetails>, AppError> {
    let user_id = principal.require()?;
    require_id(&category_id, "category id")?;
    let input = parse_body::<CategoryBody>(&body)?.into_input()?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let category = state
        .catalog()
        .update_category(&store_id, &CategoryId::new(category_id), &input)
        .await?
        .ok_or_else(|| AppError::NotFound(CATEGORY_NOT_FOUND.to_string()))?;
    Ok(Json(category))
}

/// Delete a category that no product uses.
///
/// DELETE /api/{storeId}/categories/{categoryId}
#[instrument(skip(state, principal))]
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path((store_id, category_id)): Path<(String, String)>,
) -> Result<Json<CategoryDetails>, AppError> {
    let user_id = principal.require()?;
    require_id(&category_id, "category id")?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let category = state
        .catalog()
        .delete_category(&store_id, &CategoryId::new(category_id))
        .await?
        .ok_or_else(|| AppError::NotFound(CATEGORY_NOT_FOUND.to_string()))?;
    Ok(Json(category))
}

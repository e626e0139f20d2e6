//! Size route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use duka_kuu_core::{SizeId, StoreId};

use super::{authorize_store, parse_body, require_id, require_text};
use crate::error::AppError;
use crate::middleware::Principal;
use crate::models::{Size, SizeInput};
use crate::state::AppState;

const SIZE_NOT_FOUND: &str = "Size not found.";

/// JSON body accepted by `POST` and `PATCH`.
#[derive(Debug, Default, Deserialize)]
pub struct SizeBody {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl SizeBody {
    fn into_input(self) -> Result<SizeInput, AppError> {
        Ok(SizeInput {
            name: require_text(self.name, "name")?,
            value: require_text(self.value, "value")?,
        })
    }
}

/// List a store's sizes, newest first.
///
/// GET /api/{storeId}/sizes
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<Size>>, AppError> {
    require_id(&store_id, "store id")?;
    let sizes = state.catalog().list_sizes(&StoreId::new(store_id)).await?;
    Ok(Json(sizes))
}

/// Show one size, or `null`.
///
/// GET /api/{storeId}/sizes/{sizeId}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((store_id, size_id)): Path<(String, String)>,
) -> Result<Json<Option<Size>>, AppError> {
    require_id(&size_id, "size id")?;
    let size = state
        .catalog()
        .find_size(&StoreId::new(store_id), &SizeId::new(size_id))
        .await?;
    Ok(Json(size))
}

/// Create a size.
///
/// POST /api/{storeId}/sizes
#[instrument(skip(state, principal, body))]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Path(store_id): Path<String>,
    body: Bytes,
) -> Result<Json<Size>, AppError> {
    let user_id = principal.require()?;
    let input = parse_body::<SizeBody>(&body)?.into_input()?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let size = state.catalog().create_size(&store_id, &input).await?;
    Ok(Json(size))
}

/// Update a size.
///
/// PATCH /api/{storeId}/sizes/{sizeId}
#[instrument(skip(state, principal, body))]
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path((store_id, size_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Size>, AppError> {
    let user_id = principal.require()?;
    require_id(&size_id, "size id")?;
    let input = parse_body::<SizeBody>(&body)?.into_input()?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let size = state
        .catalog()
        .update_size(&store_id, &SizeId::new(size_id), &input)
        .await?
        .ok_or_else(|| AppError::NotFound(SIZE_NOT_FOUND.to_string()))?;
    Ok(Json(size))
}

/// Delete a size that no product uses.
///
/// DELETE /api/{storeId}/sizes/{sizeId}
#[instrument(skip(state, principal))]
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path((store_id, size_id)): Path<(String, String)>,
) -> Result<Json<Size>, AppError> {
    let user_id = principal.require()?;
    require_id(&size_id, "size id")?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let size = state
        .catalog()
        .delete_size(&store_id, &SizeId::new(size_id))
        .await?
        .ok_or_else(|| AppError::NotFound(SIZE_NOT_FOUND.to_string()))?;
    Ok(Json(size))
}

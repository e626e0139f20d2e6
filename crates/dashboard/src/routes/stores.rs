//! Store route handlers.
//!
//! Every store route needs a session. Updates and deletes are owner-scoped
//! writes: a store the caller does not own is reported as `Unauthorized`.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use duka_kuu_core::{StoreId, StoreName};

use super::{parse_body, require_id, require_text};
use crate::error::AppError;
use crate::middleware::Principal;
use crate::models::Store;
use crate::state::AppState;

const INVALID_STORE_NAME: &str = "The e-commerce store must have a valid name.";

/// JSON body accepted by `POST` and `PATCH`.
#[derive(Debug, Default, Deserialize)]
pub struct StoreBody {
    pub name: Option<String>,
}

impl StoreBody {
    /// Validate the name.
    ///
    /// # Errors
    ///
    /// Returns `AppError::BadRequest` when the name is missing or too short.
    pub fn into_name(self) -> Result<StoreName, AppError> {
        let name = require_text(self.name, "name")?;
        StoreName::parse(&name).map_err(|_| AppError::bad_request(INVALID_STORE_NAME))
    }
}

/// List the caller's stores.
///
/// GET /api/stores
#[instrument(skip(state, principal))]
pub async fn index(
    State(state): State<AppState>,
    principal: Principal,
) -> Result<Json<Vec<Store>>, AppError> {
    let user_id = principal.require()?;
    let stores = state.catalog().list_stores(user_id).await?;
    Ok(Json(stores))
}

/// Create a store owned by the caller.
///
/// POST /api/stores
#[instrument(skip(state, principal, body))]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    body: Bytes,
) -> Result<Json<Store>, AppError> {
    let user_id = principal.require()?;
    let name = parse_body::<StoreBody>(&body)?.into_name()?;

    let store = state.catalog().create_store(user_id, &name).await?;
    tracing::info!(store_id = %store.id, "Store created");

    Ok(Json(store))
}

/// Show a store owned by the caller.
///
/// GET /api/stores/{storeId}
#[instrument(skip(state, principal))]
pub async fn show(
    State(state): State<AppState>,
    principal: Principal,
    Path(store_id): Path<String>,
) -> Result<Json<Store>, AppError> {
    let user_id = principal.require()?;
    require_id(&store_id, "store id")?;

    let store = state
        .catalog()
        .find_owned_store(&StoreId::new(store_id), user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Store not found.".to_string()))?;

    Ok(Json(store))
}

/// Rename a store.
///
/// PATCH /api/stores/{storeId}
#[instrument(skip(state, principal, body))]
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path(store_id): Path<String>,
    body: Bytes,
) -> Result<Json<Store>, AppError> {
    let user_id = principal.require()?;
    require_id(&store_id, "store id")?;
    let name = parse_body::<StoreBody>(&body)?.into_name()?;

    let store = state
        .catalog()
        .rename_store(&StoreId::new(store_id), user_id, &name)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(store))
}

/// Delete a store.
///
/// Fails with 409 while the store still has products, categories or other
/// dependents.
///
/// DELETE /api/stores/{storeId}
#[instrument(skip(state, principal))]
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(store_id): Path<String>,
) -> Result<Json<Store>, AppError> {
    let user_id = principal.require()?;
    require_id(&store_id, "store id")?;

    let store = state
        .catalog()
        .delete_store(&StoreId::new(store_id), user_id)
        .await?
        .ok_or(AppError::Unauthorized)?;
    tracing::info!(store_id = %store.id, "Store deleted");

    Ok(Json(store))
}

//! Hero section route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use duka_kuu_core::{HeroId, StoreId};

use super::{authorize_store, parse_body, require_id, require_text};
use crate::error::AppError;
use crate::middleware::Principal;
use crate::models::{Hero, HeroInput};
use crate::state::AppState;

const HERO_NOT_FOUND: &str = "Hero not found.";

/// JSON body accepted by `POST` and `PATCH`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroBody {
    pub label: Option<String>,
    pub image_url: Option<String>,
}

impl HeroBody {
    fn into_input(self) -> Result<HeroInput, AppError> {
        Ok(HeroInput {
            label: require_text(self.label, "label")?,
            image_url: require_text(self.image_url, "image url")?,
        })
    }
}

/// List a store's heroes, newest first.
///
/// GET /api/{storeId}/heroes
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<Hero>>, AppError> {
    require_id(&store_id, "store id")?;
    let heroes = state.catalog().list_heroes(&StoreId::new(store_id)).await?;
    Ok(Json(heroes))
}

/// Show one hero, or `null`.
///
/// GET /api/{storeId}/heroes/{heroId}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((store_id, hero_id)): Path<(String, String)>,
) -> Result<Json<Option<Hero>>, AppError> {
    require_id(&hero_id, "hero id")?;
    let hero = state
        .catalog()
        .find_hero(&StoreId::new(store_id), &HeroId::new(hero_id))
        .await?;
    Ok(Json(hero))
}

/// Create a hero.
///
/// POST /api/{storeId}/heroes
#[instrument(skip(state, principal, body))]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Path(store_id): Path<String>,
    body: Bytes,
) -> Result<Json<Hero>, AppError> {
    let user_id = principal.require()?;
    let input = parse_body::<HeroBody>(&body)?.into_input()?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let hero = state.catalog().create_hero(&store_id, &input).await?;
    Ok(Json(hero))
}

/// Update a hero.
///
/// PATCH /api/{storeId}/heroes/{heroId}
#[instrument(skip(state, principal, body))]
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path((store_id, hero_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Hero>, AppError> {
    let user_id = principal.require()?;
    require_id(&hero_id, "hero id")?;
    let input = parse_body::<HeroBody>(&body)?.into_input()?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let hero = state
        .catalog()
        .update_hero(&store_id, &HeroId::new(hero_id), &input)
        .await?
        .ok_or_else(|| AppError::NotFound(HERO_NOT_FOUND.to_string()))?;
    Ok(Json(hero))
}

/// Delete a hero that no category uses.
///
/// DELETE /api/{storeId}/heroes/{heroId}
#[instrument(skip(state, principal))]
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path((store_id, hero_id)): Path<(String, String)>,
) -> Result<Json<Hero>, AppError> {
    let user_id = principal.require()?;
    require_id(&hero_id, "hero id")?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let hero = state
        .catalog()
        .delete_hero(&store_id, &HeroId::new(hero_id))
        .await?
        .ok_or_else(|| AppError::NotFound(HERO_NOT_FOUND.to_string()))?;
    Ok(Json(hero))
}

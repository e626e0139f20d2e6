//! Color route handlers.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
};
use serde::Deserialize;
use tracing::instrument;

use duka_kuu_core::{ColorId, HexColor, StoreId};

use super::{authorize_store, parse_body, require_id, require_text};
use crate::error::AppError;
use crate::middleware::Principal;
use crate::models::{Color, ColorInput};
use crate::state::AppState;

const COLOR_NOT_FOUND: &str = "Color not found.";

/// JSON body accepted by `POST` and `PATCH`.
#[derive(Debug, Default, Deserialize)]
pub struct ColorBody {
    pub name: Option<String>,
    pub value: Option<String>,
}

impl ColorBody {
    fn into_input(self) -> Result<ColorInput, AppError> {
        let name = require_text(self.name, "name")?;
        let value = require_text(self.value, "value")?;
        let value = HexColor::parse(&value)
            .map_err(|_| AppError::bad_request("The color value must be a valid hex code."))?;
        Ok(ColorInput { name, value })
    }
}

/// List a store's colors, newest first.
///
/// GET /api/{storeId}/colors
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<Vec<Color>>, AppError> {
    require_id(&store_id, "store id")?;
    let colors = state.catalog().list_colors(&StoreId::new(store_id)).await?;
    Ok(Json(colors))
}

/// Show one color, or `null`.
///
/// GET /api/{storeId}/colors/{colorId}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((store_id, color_id)): Path<(String, String)>,
) -> Result<Json<Option<Color>>, AppError> {
    require_id(&color_id, "color id")?;
    let color = state
        .catalog()
        .find_color(&StoreId::new(store_id), &ColorId::new(color_id))
        .await?;
    Ok(Json(color))
}

/// Create a color.
///
/// POST /api/{storeId}/colors
#[instrument(skip(state, principal, body))]
pub async fn create(
    State(state): State<AppState>,
    principal: Principal,
    Path(store_id): Path<String>,
    body: Bytes,
) -> Result<Json<Color>, AppError> {
    let user_id = principal.require()?;
    let input = parse_body::<ColorBody>(&body)?.into_input()?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let color = state.catalog().create_color(&store_id, &input).await?;
    Ok(Json(color))
}

/// Update a color.
///
/// PATCH /api/{storeId}/colors/{colorId}
#[instrument(skip(state, principal, body))]
pub async fn update(
    State(state): State<AppState>,
    principal: Principal,
    Path((store_id, color_id)): Path<(String, String)>,
    body: Bytes,
) -> Result<Json<Color>, AppError> {
    let user_id = principal.require()?;
    require_id(&color_id, "color id")?;
    let input = parse_body::<ColorBody>(&body)?.into_input()?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let color = state
        .catalog()
        .update_color(&store_id, &ColorId::new(color_id), &input)
        .await?
        .ok_or_else(|| AppError::NotFound(COLOR_NOT_FOUND.to_string()))?;
    Ok(Json(color))
}

/// Delete a color that no product uses.
///
/// DELETE /api/{storeId}/colors/{colorId}
#[instrument(skip(state, principal))]
pub async fn delete(
    State(state): State<AppState>,
    principal: Principal,
    Path((store_id, color_id)): Path<(String, String)>,
) -> Result<Json<Color>, AppError> {
    let user_id = principal.require()?;
    require_id(&color_id, "color id")?;

    let store_id = StoreId::new(store_id);
    authorize_store(&state, &store_id, user_id).await?;

    let color = state
        .catalog()
        .delete_color(&store_id, &ColorId::new(color_id))
        .await?
        .ok_or_else(|| AppError::NotFound(COLOR_NOT_FOUND.to_string()))?;
    Ok(Json(color))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: Option<&str>, value: Option<&str>) -> Option<String> {
        ColorBody {
            name: name.map(String::from),
            value: value.map(String::from),
        }
        .into_input()
        .err()
        .map(|e| e.to_string())
    }

    #[test]
    fn test_color_body_validation() {
        assert_eq!(message(None, None).as_deref(), Some("The name is required."));
        assert_eq!(
            message(Some("Red"), None).as_deref(),
            Some("The value is required.")
        );
        assert_eq!(
            message(Some("Red"), Some("red")).as_deref(),
            Some("The color value must be a valid hex code.")
        );
        assert_eq!(message(Some("Red"), Some("#FF0000")), None);
    }
}

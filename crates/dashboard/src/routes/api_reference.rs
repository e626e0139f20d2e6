//! Route tables for the dashboard's "API" usage panel.
//!
//! URLs are built from the configured public base, so the panel shows the
//! addresses a storefront would call rather than the admin bind address.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use super::require_id;
use crate::error::AppError;
use crate::state::AppState;

/// Who may call a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    Public,
    Admin,
}

/// One row of the usage panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Endpoint {
    pub method: &'static str,
    pub url: String,
    pub access: Access,
}

/// Body of `GET /api/{storeId}/api-url`.
#[derive(Debug, Serialize)]
pub struct ApiUrl {
    pub url: String,
}

/// Path placeholder for an entity's id, or `None` for unknown entities.
fn id_placeholder(entity: &str) -> Option<&'static str> {
    match entity {
        "products" => Some("productId"),
        "heroes" => Some("heroId"),
        "categories" => Some("categoryId"),
        "sizes" => Some("sizeId"),
        "colors" => Some("colorId"),
        _ => None,
    }
}

/// Build the five routes for `entity` under `base`.
pub fn endpoints(base: &str, store_id: &str, entity: &str) -> Option<Vec<Endpoint>> {
    let placeholder = id_placeholder(entity)?;
    let collection = format!("{base}/api/{store_id}/{entity}");
    let item = format!("{collection}/{{{placeholder}}}");

    let endpoint = |method, url: &String, access| Endpoint {
        method,
        url: url.clone(),
        access,
    };

    Some(vec![
        endpoint("GET", &collection, Access::Public),
        endpoint("GET", &item, Access::Public),
        endpoint("POST", &collection, Access::Admin),
        endpoint("PATCH", &item, Access::Admin),
        endpoint("DELETE", &item, Access::Admin),
    ])
}

/// GET /api/{storeId}/api-reference/{entity}
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path((store_id, entity)): Path<(String, String)>,
) -> Result<Json<Vec<Endpoint>>, AppError> {
    require_id(&store_id, "store id")?;
    endpoints(&state.config().public_api_url, &store_id, &entity)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Unknown entity: {entity}")))
}

/// GET /api/{storeId}/api-url
#[instrument(skip(state))]
pub async fn api_url(
    State(state): State<AppState>,
    Path(store_id): Path<String>,
) -> Result<Json<ApiUrl>, AppError> {
    require_id(&store_id, "store id")?;
    Ok(Json(ApiUrl {
        url: format!("{}/api/{store_id}", state.config().public_api_url),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_for_heroes() {
        let rows = endpoints("https://shop.example", "store1", "heroes").unwrap();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].url, "https://shop.example/api/store1/heroes");
        assert_eq!(rows[1].url, "https://shop.example/api/store1/heroes/{heroId}");
        assert_eq!(rows[3].method, "PATCH");
        assert_eq!(rows[3].access, Access::Admin);
        assert_eq!(rows[1].access, Access::Public);
    }

    #[test]
    fn test_endpoints_unknown_entity() {
        assert!(endpoints("https://shop.example", "store1", "orders").is_none());
    }

    #[test]
    fn test_access_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Access::Public).unwrap(),
            "\"public\""
        );
    }
}

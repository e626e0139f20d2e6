//! Category domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use duka_kuu_core::{CategoryId, HeroId, StoreId};

use super::Hero;

/// A product category. Each category is promoted by one hero section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub store_id: StoreId,
    pub hero_id: HeroId,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A category with its hero section loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDetails {
    #[serde(flatten)]
    pub category: Category,
    pub hero: Hero,
}

/// Validated input for creating or updating a category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryInput {
    pub name: String,
    pub hero_id: HeroId,
}

//! Hero section (promotional banner) domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use duka_kuu_core::{HeroId, StoreId};

/// A promotional banner scoped to a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hero {
    pub id: HeroId,
    pub store_id: StoreId,
    /// Headline shown on the banner; also the search key in the dashboard table.
    pub label: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or updating a hero section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeroInput {
    pub label: String,
    pub image_url: String,
}

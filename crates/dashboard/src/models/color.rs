//! Color domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use duka_kuu_core::{ColorId, HexColor, StoreId};

/// A product color offered by a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: ColorId,
    pub store_id: StoreId,
    pub name: String,
    /// Hex code, e.g. `#1a2b3c`.
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or updating a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorInput {
    pub name: String,
    pub value: HexColor,
}

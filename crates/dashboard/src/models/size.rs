//! Size domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use duka_kuu_core::{SizeId, StoreId};

/// A product size offered by a store (e.g. name "Large", value "L").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: SizeId,
    pub store_id: StoreId,
    pub name: String,
    pub value: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating or updating a size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SizeInput {
    pub name: String,
    pub value: String,
}

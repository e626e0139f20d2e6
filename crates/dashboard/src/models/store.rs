//! Store domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use duka_kuu_core::{StoreId, UserId};

/// An e-commerce store (tenant) owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    /// Unique store ID.
    pub id: StoreId,
    /// Display name.
    pub name: String,
    /// The owning user (identity provider subject).
    pub user_id: UserId,
    /// When the store was created.
    pub created_at: DateTime<Utc>,
    /// When the store was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Store {
    /// Whether `user_id` owns this store.
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

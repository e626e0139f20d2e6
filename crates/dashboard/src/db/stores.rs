//! Store repository.
//!
//! Every query is scoped by the owning user, so "not yours" and "does not
//! exist" are indistinguishable to callers.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use duka_kuu_core::{StoreId, StoreName, UserId};

use super::RepositoryError;
use crate::models::Store;

/// Message returned when a store still has products or categories.
pub const STORE_IN_USE: &str =
    "Remove associated products and categories before deleting this e-commerce store.";

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct StoreRow {
    id: String,
    name: String,
    user_id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<StoreRow> for Store {
    fn from(row: StoreRow) -> Self {
        Self {
            id: StoreId::new(row.id),
            name: row.name,
            user_id: UserId::new(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for store database operations.
pub struct StoreRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> StoreRepository<'a> {
    /// Create a new store repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a user's stores, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_user(&self, user_id: &UserId) -> Result<Vec<Store>, RepositoryError> {
        let rows = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, user_id, created_at, updated_at
            FROM dashboard.store
            WHERE user_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(user_id.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a store if it exists and belongs to `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_owned(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            SELECT id, name, user_id, created_at, updated_at
            FROM dashboard.store
            WHERE id = $1 AND user_id = $2
            ",
        )
        .bind(store_id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a store owned by `user_id`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        user_id: &UserId,
        name: &StoreName,
    ) -> Result<Store, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            INSERT INTO dashboard.store (id, name, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(StoreId::generate().as_str())
        .bind(name.as_str())
        .bind(user_id.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Rename a store owned by `user_id`.
    ///
    /// Returns `None` when no owned store matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn rename(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
        name: &StoreName,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            UPDATE dashboard.store
            SET name = $3, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(store_id.as_str())
        .bind(user_id.as_str())
        .bind(name.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Delete a store owned by `user_id`.
    ///
    /// Returns `None` when no owned store matches.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the store still has dependents.
    /// Returns `RepositoryError::Database` for any other failure.
    pub async fn delete(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        let row = sqlx::query_as::<_, StoreRow>(
            r"
            DELETE FROM dashboard.store
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, user_id, created_at, updated_at
            ",
        )
        .bind(store_id.as_str())
        .bind(user_id.as_str())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::restrict_violation(e, STORE_IN_USE))?;

        Ok(row.map(Into::into))
    }
}

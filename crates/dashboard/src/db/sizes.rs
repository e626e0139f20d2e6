//! Size repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use duka_kuu_core::{SizeId, StoreId};

use super::RepositoryError;
use crate::models::{Size, SizeInput};

/// Message returned when a size is still used by a product.
pub const SIZE_IN_USE: &str = "Remove all products and categories using this size first.";

#[derive(Debug, sqlx::FromRow)]
pub(super) struct SizeRow {
    pub(super) id: String,
    pub(super) store_id: String,
    pub(super) name: String,
    pub(super) value: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl From<SizeRow> for Size {
    fn from(row: SizeRow) -> Self {
        Self {
            id: SizeId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: row.name,
            value: row.value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for size database operations.
pub struct SizeRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> SizeRepository<'a> {
    /// Create a new size repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's sizes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: &StoreId) -> Result<Vec<Size>, RepositoryError> {
        let rows = sqlx::query_as::<_, SizeRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM dashboard.size
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a size within a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM dashboard.size
            WHERE store_id = $1 AND id = $2
            ",
        )
        .bind(store_id.as_str())
        .bind(size_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a size.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: &StoreId,
        input: &SizeInput,
    ) -> Result<Size, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            INSERT INTO dashboard.size (id, store_id, name, value)
            VALUES ($1, $2, $3, $4)
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(SizeId::generate().as_str())
        .bind(store_id.as_str())
        .bind(&input.name)
        .bind(&input.value)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a size.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
        input: &SizeInput,
    ) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            UPDATE dashboard.size
            SET name = $3, value = $4, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id.as_str())
        .bind(size_id.as_str())
        .bind(&input.name)
        .bind(&input.value)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Delete a size.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a product still uses the size.
    /// Returns `RepositoryError::Database` for any other failure.
    pub async fn delete(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let row = sqlx::query_as::<_, SizeRow>(
            r"
            DELETE FROM dashboard.size
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id.as_str())
        .bind(size_id.as_str())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::restrict_violation(e, SIZE_IN_USE))?;

        Ok(row.map(Into::into))
    }
}

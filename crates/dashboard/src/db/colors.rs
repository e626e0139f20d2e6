//! Color repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use duka_kuu_core::{ColorId, StoreId};

use super::RepositoryError;
use crate::models::{Color, ColorInput};

/// Message returned when a color is still used by a product.
pub const COLOR_IN_USE: &str = "Remove all products and categories using this color first.";

#[derive(Debug, sqlx::FromRow)]
pub(super) struct ColorRow {
    pub(super) id: String,
    pub(super) store_id: String,
    pub(super) name: String,
    pub(super) value: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl From<ColorRow> for Color {
    fn from(row: ColorRow) -> Self {
        Self {
            id: ColorId::new(row.id),
            store_id: StoreId::new(row.store_id),
            name: row.name,
            value: row.value,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for color database operations.
pub struct ColorRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ColorRepository<'a> {
    /// Create a new color repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's colors, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: &StoreId) -> Result<Vec<Color>, RepositoryError> {
        let rows = sqlx::query_as::<_, ColorRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM dashboard.color
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a color within a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            SELECT id, store_id, name, value, created_at, updated_at
            FROM dashboard.color
            WHERE store_id = $1 AND id = $2
            ",
        )
        .bind(store_id.as_str())
        .bind(color_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a color.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: &StoreId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            INSERT INTO dashboard.color (id, store_id, name, value)
            VALUES ($1, $2, $3, $4)
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(ColorId::generate().as_str())
        .bind(store_id.as_str())
        .bind(&input.name)
        .bind(input.value.as_str())
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a color.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
        input: &ColorInput,
    ) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            UPDATE dashboard.color
            SET name = $3, value = $4, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id.as_str())
        .bind(color_id.as_str())
        .bind(&input.name)
        .bind(input.value.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Delete a color.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a product still uses the color.
    /// Returns `RepositoryError::Database` for any other failure.
    pub async fn delete(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let row = sqlx::query_as::<_, ColorRow>(
            r"
            DELETE FROM dashboard.color
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, name, value, created_at, updated_at
            ",
        )
        .bind(store_id.as_str())
        .bind(color_id.as_str())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::restrict_violation(e, COLOR_IN_USE))?;

        Ok(row.map(Into::into))
    }
}

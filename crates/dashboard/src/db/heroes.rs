//! Hero section repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use duka_kuu_core::{HeroId, StoreId};

use super::RepositoryError;
use crate::models::{Hero, HeroInput};

/// Message returned when a hero is still promoted by a category.
pub const HERO_IN_USE: &str = "Remove all products and categories using this hero first.";

#[derive(Debug, sqlx::FromRow)]
pub(super) struct HeroRow {
    pub(super) id: String,
    pub(super) store_id: String,
    pub(super) label: String,
    pub(super) image_url: String,
    pub(super) created_at: DateTime<Utc>,
    pub(super) updated_at: DateTime<Utc>,
}

impl From<HeroRow> for Hero {
    fn from(row: HeroRow) -> Self {
        Self {
            id: HeroId::new(row.id),
            store_id: StoreId::new(row.store_id),
            label: row.label,
            image_url: row.image_url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Repository for hero database operations.
pub struct HeroRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> HeroRepository<'a> {
    /// Create a new hero repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's heroes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: &StoreId) -> Result<Vec<Hero>, RepositoryError> {
        let rows = sqlx::query_as::<_, HeroRow>(
            r"
            SELECT id, store_id, label, image_url, created_at, updated_at
            FROM dashboard.hero
            WHERE store_id = $1
            ORDER BY created_at DESC
            ",
        )
        .bind(store_id.as_str())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a hero within a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
    ) -> Result<Option<Hero>, RepositoryError> {
        let row = sqlx::query_as::<_, HeroRow>(
            r"
            SELECT id, store_id, label, image_url, created_at, updated_at
            FROM dashboard.hero
            WHERE store_id = $1 AND id = $2
            ",
        )
        .bind(store_id.as_str())
        .bind(hero_id.as_str())
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Create a hero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: &StoreId,
        input: &HeroInput,
    ) -> Result<Hero, RepositoryError> {
        let row = sqlx::query_as::<_, HeroRow>(
            r"
            INSERT INTO dashboard.hero (id, store_id, label, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(HeroId::generate().as_str())
        .bind(store_id.as_str())
        .bind(&input.label)
        .bind(&input.image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(row.into())
    }

    /// Update a hero's label and image.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
        input: &HeroInput,
    ) -> Result<Option<Hero>, RepositoryError> {
        let row = sqlx::query_as::<_, HeroRow>(
            r"
            UPDATE dashboard.hero
            SET label = $3, image_url = $4, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(store_id.as_str())
        .bind(hero_id.as_str())
        .bind(&input.label)
        .bind(&input.image_url)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    /// Delete a hero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a category still uses the hero.
    /// Returns `RepositoryError::Database` for any other failure.
    pub async fn delete(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
    ) -> Result<Option<Hero>, RepositoryError> {
        let row = sqlx::query_as::<_, HeroRow>(
            r"
            DELETE FROM dashboard.hero
            WHERE store_id = $1 AND id = $2
            RETURNING id, store_id, label, image_url, created_at, updated_at
            ",
        )
        .bind(store_id.as_str())
        .bind(hero_id.as_str())
        .fetch_optional(self.pool)
        .await
        .map_err(|e| RepositoryError::restrict_violation(e, HERO_IN_USE))?;

        Ok(row.map(Into::into))
    }
}

//! Category repository.
//!
//! Categories are always read joined with the hero that promotes them.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use duka_kuu_core::{CategoryId, HeroId, StoreId};

use super::RepositoryError;
use crate::models::{Category, CategoryDetails, CategoryInput, Hero};

/// Message returned when a category is still used by a product.
pub const CATEGORY_IN_USE: &str = "Remove all products and categories using this category first.";

const SELECT_DETAILS: &str = r"
    SELECT c.id, c.store_id, c.hero_id, c.name, c.created_at, c.updated_at,
           h.label AS hero_label, h.image_url AS hero_image_url,
           h.created_at AS hero_created_at, h.updated_at AS hero_updated_at
    FROM dashboard.category c
    JOIN dashboard.hero h ON h.id = c.hero_id
";

#[derive(Debug, sqlx::FromRow)]
struct CategoryDetailsRow {
    id: String,
    store_id: String,
    hero_id: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    hero_label: String,
    hero_image_url: String,
    hero_created_at: DateTime<Utc>,
    hero_updated_at: DateTime<Utc>,
}

impl From<CategoryDetailsRow> for CategoryDetails {
    fn from(row: CategoryDetailsRow) -> Self {
        let store_id = StoreId::new(row.store_id);
        let hero_id = HeroId::new(row.hero_id);

        Self {
            hero: Hero {
                id: hero_id.clone(),
                store_id: store_id.clone(),
                label: row.hero_label,
                image_url: row.hero_image_url,
                created_at: row.hero_created_at,
                updated_at: row.hero_updated_at,
            },
            category: Category {
                id: CategoryId::new(row.id),
                store_id,
                hero_id,
                name: row.name,
                created_at: row.created_at,
                updated_at: row.updated_at,
            },
        }
    }
}

/// Repository for category database operations.
pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    /// Create a new category repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's categories with their heroes, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self, store_id: &StoreId) -> Result<Vec<CategoryDetails>, RepositoryError> {
        let sql = format!("{SELECT_DETAILS} WHERE c.store_id = $1 ORDER BY c.created_at DESC");
        let rows = sqlx::query_as::<_, CategoryDetailsRow>(&sql)
            .bind(store_id.as_str())
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    /// Get a category within a store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
    ) -> Result<Option<CategoryDetails>, RepositoryError> {
        let sql = format!("{SELECT_DETAILS} WHERE c.store_id = $1 AND c.id = $2");
        let row = sqlx::query_as::<_, CategoryDetailsRow>(&sql)
            .bind(store_id.as_str())
            .bind(category_id.as_str())
            .fetch_optional(self.pool)
            .await?;

        Ok(row.map(Into::into))
    }

    /// Create a category promoted by one of the store's heroes.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the hero is not in the store.
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        store_id: &StoreId,
        input: &CategoryInput,
    ) -> Result<CategoryDetails, RepositoryError> {
        let category_id = CategoryId::generate();

        let inserted = sqlx::query(
            r"
            INSERT INTO dashboard.category (id, store_id, hero_id, name)
            SELECT $1, $2, h.id, $4
            FROM dashboard.hero h
            WHERE h.store_id = $2 AND h.id = $3
            ",
        )
        .bind(category_id.as_str())
        .bind(store_id.as_str())
        .bind(input.hero_id.as_str())
        .bind(&input.name)
        .execute(self.pool)
        .await?;

        if inserted.rows_affected() == 0 {
            return Err(RepositoryError::InvalidReference("hero id"));
        }

        self.get(store_id, &category_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Update a category's name and hero.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the hero is not in the store.
    /// Returns `RepositoryError::Database` if the update fails.
    pub async fn update(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
        input: &CategoryInput,
    ) -> Result<Option<CategoryDetails>, RepositoryError> {
        if self.get(store_id, category_id).await?.is_none() {
            return Ok(None);
        }

        let updated = sqlx::query(
            r"
            UPDATE dashboard.category c
            SET name = $4, hero_id = h.id, updated_at = NOW()
            FROM dashboard.hero h
            WHERE c.store_id = $1 AND c.id = $2
              AND h.store_id = $1 AND h.id = $3
            ",
        )
        .bind(store_id.as_str())
        .bind(category_id.as_str())
        .bind(input.hero_id.as_str())
        .bind(&input.name)
        .execute(self.pool)
        .await?;

        if updated.rows_affected() == 0 {
            return Err(RepositoryError::InvalidReference("hero id"));
        }

        self.get(store_id, category_id).await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if a product still uses the category.
    /// Returns `RepositoryError::Database` for any other failure.
    pub async fn delete(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
    ) -> Result<Option<CategoryDetails>, RepositoryError> {
        let Some(details) = self.get(store_id, category_id).await? else {
            return Ok(None);
        };

        sqlx::query("DELETE FROM dashboard.category WHERE store_id = $1 AND id = $2")
            .bind(store_id.as_str())
            .bind(category_id.as_str())
            .execute(self.pool)
            .await
            .map_err(|e| RepositoryError::restrict_violation(e, CATEGORY_IN_USE))?;

        Ok(Some(details))
    }
}

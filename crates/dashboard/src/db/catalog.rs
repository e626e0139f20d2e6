//! The persistence seam used by every route handler.

use async_trait::async_trait;
use sqlx::PgPool;

use duka_kuu_core::{
    CategoryId, ColorId, HeroId, ProductId, SizeId, StoreId, StoreName, UserId,
};

use super::RepositoryError;
use super::categories::CategoryRepository;
use super::colors::ColorRepository;
use super::heroes::HeroRepository;
use super::products::ProductRepository;
use super::sizes::SizeRepository;
use super::stores::StoreRepository;
use crate::models::{
    CategoryDetails, CategoryInput, Color, ColorInput, Hero, HeroInput, Product, ProductDetails,
    ProductFilter, ProductInput, Size, SizeInput, Store,
};

/// Store-scoped catalog persistence.
///
/// Every lookup below a store is keyed by `(store_id, id)`, so a record that
/// exists in another store behaves exactly like a missing record. Mutations
/// return `Ok(None)` when no matching row exists.
///
/// Ownership is *not* checked here; handlers call [`Catalog::find_owned_store`]
/// first.
#[async_trait]
pub trait Catalog: Send + Sync {
    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), RepositoryError>;

    // Stores

    async fn list_stores(&self, user_id: &UserId) -> Result<Vec<Store>, RepositoryError>;
    async fn find_owned_store(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError>;
    async fn create_store(
        &self,
        user_id: &UserId,
        name: &StoreName,
    ) -> Result<Store, RepositoryError>;
    async fn rename_store(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
        name: &StoreName,
    ) -> Result<Option<Store>, RepositoryError>;
    /// Fails with [`RepositoryError::Conflict`] while the store has dependents.
    async fn delete_store(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError>;

    // Products

    async fn list_products(
        &self,
        store_id: &StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetails>, RepositoryError>;
    async fn find_product(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
    ) -> Result<Option<ProductDetails>, RepositoryError>;
    /// Fails with [`RepositoryError::InvalidReference`] when the category,
    /// size or color is not part of the store.
    async fn create_product(
        &self,
        store_id: &StoreId,
        input: &ProductInput,
    ) -> Result<ProductDetails, RepositoryError>;
    /// Updates scalar fields and replaces the whole image set atomically.
    async fn update_product(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
        input: &ProductInput,
    ) -> Result<Option<ProductDetails>, RepositoryError>;
    async fn delete_product(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
    ) -> Result<Option<Product>, RepositoryError>;

    // Heroes

    async fn list_heroes(&self, store_id: &StoreId) -> Result<Vec<Hero>, RepositoryError>;
    async fn find_hero(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
    ) -> Result<Option<Hero>, RepositoryError>;
    async fn create_hero(
        &self,
        store_id: &StoreId,
        input: &HeroInput,
    ) -> Result<Hero, RepositoryError>;
    async fn update_hero(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
        input: &HeroInput,
    ) -> Result<Option<Hero>, RepositoryError>;
    async fn delete_hero(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
    ) -> Result<Option<Hero>, RepositoryError>;

    // Categories

    async fn list_categories(
        &self,
        store_id: &StoreId,
    ) -> Result<Vec<CategoryDetails>, RepositoryError>;
    async fn find_category(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
    ) -> Result<Option<CategoryDetails>, RepositoryError>;
    async fn create_category(
        &self,
        store_id: &StoreId,
        input: &CategoryInput,
    ) -> Result<CategoryDetails, RepositoryError>;
    async fn update_category(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
        input: &CategoryInput,
    ) -> Result<Option<CategoryDetails>, RepositoryError>;
    async fn delete_category(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
    ) -> Result<Option<CategoryDetails>, RepositoryError>;

    // Sizes

    async fn list_sizes(&self, store_id: &StoreId) -> Result<Vec<Size>, RepositoryError>;
    async fn find_size(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
    ) -> Result<Option<Size>, RepositoryError>;
    async fn create_size(
        &self,
        store_id: &StoreId,
        input: &SizeInput,
    ) -> Result<Size, RepositoryError>;
    async fn update_size(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
        input: &SizeInput,
    ) -> Result<Option<Size>, RepositoryError>;
    async fn delete_size(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
    ) -> Result<Option<Size>, RepositoryError>;

    // Colors

    async fn list_colors(&self, store_id: &StoreId) -> Result<Vec<Color>, RepositoryError>;
    async fn find_color(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
    ) -> Result<Option<Color>, RepositoryError>;
    async fn create_color(
        &self,
        store_id: &StoreId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError>;
    async fn update_color(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
        input: &ColorInput,
    ) -> Result<Option<Color>, RepositoryError>;
    async fn delete_color(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
    ) -> Result<Option<Color>, RepositoryError>;
}

/// [`Catalog`] backed by `PostgreSQL`.
#[derive(Clone)]
pub struct PgCatalog {
    pool: PgPool,
}

impl PgCatalog {
    /// Create a catalog over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// The underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl Catalog for PgCatalog {
    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list_stores(&self, user_id: &UserId) -> Result<Vec<Store>, RepositoryError> {
        StoreRepository::new(&self.pool).list_for_user(user_id).await
    }

    async fn find_owned_store(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        StoreRepository::new(&self.pool)
            .get_owned(store_id, user_id)
            .await
    }

    async fn create_store(
        &self,
        user_id: &UserId,
        name: &StoreName,
    ) -> Result<Store, RepositoryError> {
        StoreRepository::new(&self.pool).create(user_id, name).await
    }

    async fn rename_store(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
        name: &StoreName,
    ) -> Result<Option<Store>, RepositoryError> {
        StoreRepository::new(&self.pool)
            .rename(store_id, user_id, name)
            .await
    }

    async fn delete_store(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        StoreRepository::new(&self.pool)
            .delete(store_id, user_id)
            .await
    }

    async fn list_products(
        &self,
        store_id: &StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetails>, RepositoryError> {
        ProductRepository::new(&self.pool)
            .list(store_id, filter)
            .await
    }

    async fn find_product(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
    ) -> Result<Option<ProductDetails>, RepositoryError> {
        ProductRepository::new(&self.pool)
            .get_details(store_id, product_id)
            .await
    }

    async fn create_product(
        &self,
        store_id: &StoreId,
        input: &ProductInput,
    ) -> Result<ProductDetails, RepositoryError> {
        ProductRepository::new(&self.pool)
            .create(store_id, input)
            .await
    }

    async fn update_product(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
        input: &ProductInput,
    ) -> Result<Option<ProductDetails>, RepositoryError> {
        ProductRepository::new(&self.pool)
            .update(store_id, product_id, input)
            .await
    }

    async fn delete_product(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        ProductRepository::new(&self.pool)
            .delete(store_id, product_id)
            .await
    }

    async fn list_heroes(&self, store_id: &StoreId) -> Result<Vec<Hero>, RepositoryError> {
        HeroRepository::new(&self.pool).list(store_id).await
    }

    async fn find_hero(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
    ) -> Result<Option<Hero>, RepositoryError> {
        HeroRepository::new(&self.pool).get(store_id, hero_id).await
    }

    async fn create_hero(
        &self,
        store_id: &StoreId,
        input: &HeroInput,
    ) -> Result<Hero, RepositoryError> {
        HeroRepository::new(&self.pool).create(store_id, input).await
    }

    async fn update_hero(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
        input: &HeroInput,
    ) -> Result<Option<Hero>, RepositoryError> {
        HeroRepository::new(&self.pool)
            .update(store_id, hero_id, input)
            .await
    }

    async fn delete_hero(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
    ) -> Result<Option<Hero>, RepositoryError> {
        HeroRepository::new(&self.pool)
            .delete(store_id, hero_id)
            .await
    }

    async fn list_categories(
        &self,
        store_id: &StoreId,
    ) -> Result<Vec<CategoryDetails>, RepositoryError> {
        CategoryRepository::new(&self.pool).list(store_id).await
    }

    async fn find_category(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
    ) -> Result<Option<CategoryDetails>, RepositoryError> {
        CategoryRepository::new(&self.pool)
            .get(store_id, category_id)
            .await
    }

    async fn create_category(
        &self,
        store_id: &StoreId,
        input: &CategoryInput,
    ) -> Result<CategoryDetails, RepositoryError> {
        CategoryRepository::new(&self.pool)
            .create(store_id, input)
            .await
    }

    async fn update_category(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
        input: &CategoryInput,
    ) -> Result<Option<CategoryDetails>, RepositoryError> {
        CategoryRepository::new(&self.pool)
            .update(store_id, category_id, input)
            .await
    }

    async fn delete_category(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
    ) -> Result<Option<CategoryDetails>, RepositoryError> {
        CategoryRepository::new(&self.pool)
            .delete(store_id, category_id)
            .await
    }

    async fn list_sizes(&self, store_id: &StoreId) -> Result<Vec<Size>, RepositoryError> {
        SizeRepository::new(&self.pool).list(store_id).await
    }

    async fn find_size(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        SizeRepository::new(&self.pool).get(store_id, size_id).await
    }

    async fn create_size(
        &self,
        store_id: &StoreId,
        input: &SizeInput,
    ) -> Result<Size, RepositoryError> {
        SizeRepository::new(&self.pool).create(store_id, input).await
    }

    async fn update_size(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
        input: &SizeInput,
    ) -> Result<Option<Size>, RepositoryError> {
        SizeRepository::new(&self.pool)
            .update(store_id, size_id, input)
            .await
    }

    async fn delete_size(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        SizeRepository::new(&self.pool)
            .delete(store_id, size_id)
            .await
    }

    async fn list_colors(&self, store_id: &StoreId) -> Result<Vec<Color>, RepositoryError> {
        ColorRepository::new(&self.pool).list(store_id).await
    }

    async fn find_color(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        ColorRepository::new(&self.pool).get(store_id, color_id).await
    }

    async fn create_color(
        &self,
        store_id: &StoreId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError> {
        ColorRepository::new(&self.pool).create(store_id, input).await
    }

    async fn update_color(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
        input: &ColorInput,
    ) -> Result<Option<Color>, RepositoryError> {
        ColorRepository::new(&self.pool)
            .update(store_id, color_id, input)
            .await
    }

    async fn delete_color(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        ColorRepository::new(&self.pool)
            .delete(store_id, color_id)
            .await
    }
}

//! In-process [`Catalog`] used by tests and `DASHBOARD_STORAGE=memory` runs.
//!
//! Mirrors the `PostgreSQL` constraints: every reference is checked against
//! the owning store and deletes of referenced rows are refused.

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use duka_kuu_core::{
    CategoryId, ColorId, HeroId, ImageId, ProductId, SizeId, StoreId, StoreName, UserId,
};

use super::RepositoryError;
use super::catalog::Catalog;
use super::categories::CATEGORY_IN_USE;
use super::colors::COLOR_IN_USE;
use super::heroes::HERO_IN_USE;
use super::sizes::SIZE_IN_USE;
use super::stores::STORE_IN_USE;
use crate::models::{
    Category, CategoryDetails, CategoryInput, Color, ColorInput, Hero, HeroInput, Image, Product,
    ProductDetails, ProductFilter, ProductInput, Size, SizeInput, Store,
};

/// Rows are kept in insertion order; listings walk them in reverse.
#[derive(Debug, Default)]
struct Tables {
    stores: Vec<Store>,
    heroes: Vec<Hero>,
    categories: Vec<Category>,
    sizes: Vec<Size>,
    colors: Vec<Color>,
    products: Vec<Product>,
    images: Vec<Image>,
}

impl Tables {
    fn hero(&self, store_id: &StoreId, hero_id: &HeroId) -> Option<&Hero> {
        self.heroes
            .iter()
            .find(|h| &h.store_id == store_id && &h.id == hero_id)
    }

    fn category(&self, store_id: &StoreId, category_id: &CategoryId) -> Option<&Category> {
        self.categories
            .iter()
            .find(|c| &c.store_id == store_id && &c.id == category_id)
    }

    fn size(&self, store_id: &StoreId, size_id: &SizeId) -> Option<&Size> {
        self.sizes
            .iter()
            .find(|s| &s.store_id == store_id && &s.id == size_id)
    }

    fn color(&self, store_id: &StoreId, color_id: &ColorId) -> Option<&Color> {
        self.colors
            .iter()
            .find(|c| &c.store_id == store_id && &c.id == color_id)
    }

    fn category_details(&self, category: &Category) -> Result<CategoryDetails, RepositoryError> {
        let hero = self
            .hero(&category.store_id, &category.hero_id)
            .cloned()
            .ok_or_else(|| {
                RepositoryError::DataCorruption(format!(
                    "category {} references a missing hero",
                    category.id
                ))
            })?;

        Ok(CategoryDetails {
            category: category.clone(),
            hero,
        })
    }

    fn product_details(&self, product: &Product) -> Result<ProductDetails, RepositoryError> {
        let missing = |what: &str| {
            RepositoryError::DataCorruption(format!(
                "product {} references a missing {what}",
                product.id
            ))
        };

        Ok(ProductDetails {
            images: self
                .images
                .iter()
                .filter(|image| image.product_id == product.id)
                .cloned()
                .collect(),
            category: self
                .category(&product.store_id, &product.category_id)
                .cloned()
                .ok_or_else(|| missing("category"))?,
            size: self
                .size(&product.store_id, &product.size_id)
                .cloned()
                .ok_or_else(|| missing("size"))?,
            color: self
                .color(&product.store_id, &product.color_id)
                .cloned()
                .ok_or_else(|| missing("color"))?,
            product: product.clone(),
        })
    }

    fn check_references(
        &self,
        store_id: &StoreId,
        input: &ProductInput,
    ) -> Result<(), RepositoryError> {
        if self.category(store_id, &input.category_id).is_none() {
            return Err(RepositoryError::InvalidReference("category id"));
        }
        if self.color(store_id, &input.color_id).is_none() {
            return Err(RepositoryError::InvalidReference("color id"));
        }
        if self.size(store_id, &input.size_id).is_none() {
            return Err(RepositoryError::InvalidReference("size id"));
        }
        Ok(())
    }

    fn replace_images(&mut self, product_id: &ProductId, urls: &[String]) {
        self.images.retain(|image| &image.product_id != product_id);
        let now = Utc::now();
        self.images.extend(urls.iter().map(|url| Image {
            id: ImageId::generate(),
            product_id: product_id.clone(),
            url: url.clone(),
            created_at: now,
            updated_at: now,
        }));
    }
}

/// [`Catalog`] held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
    tables: RwLock<Tables>,
}

impl MemoryCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Catalog for MemoryCatalog {
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }

    // =========================================================================
    // Stores
    // =========================================================================

    async fn list_stores(&self, user_id: &UserId) -> Result<Vec<Store>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stores
            .iter()
            .rev()
            .filter(|s| s.is_owned_by(user_id))
            .cloned()
            .collect())
    }

    async fn find_owned_store(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .stores
            .iter()
            .find(|s| &s.id == store_id && s.is_owned_by(user_id))
            .cloned())
    }

    async fn create_store(
        &self,
        user_id: &UserId,
        name: &StoreName,
    ) -> Result<Store, RepositoryError> {
        let now = Utc::now();
        let store = Store {
            id: StoreId::generate(),
            name: name.to_string(),
            user_id: user_id.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.stores.push(store.clone());
        Ok(store)
    }

    async fn rename_store(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
        name: &StoreName,
    ) -> Result<Option<Store>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(store) = tables
            .stores
            .iter_mut()
            .find(|s| &s.id == store_id && s.is_owned_by(user_id))
        else {
            return Ok(None);
        };

        store.name = name.to_string();
        store.updated_at = Utc::now();
        Ok(Some(store.clone()))
    }

    async fn delete_store(
        &self,
        store_id: &StoreId,
        user_id: &UserId,
    ) -> Result<Option<Store>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .stores
            .iter()
            .position(|s| &s.id == store_id && s.is_owned_by(user_id))
        else {
            return Ok(None);
        };

        let in_use = tables.heroes.iter().any(|h| &h.store_id == store_id)
            || tables.categories.iter().any(|c| &c.store_id == store_id)
            || tables.sizes.iter().any(|s| &s.store_id == store_id)
            || tables.colors.iter().any(|c| &c.store_id == store_id)
            || tables.products.iter().any(|p| &p.store_id == store_id);
        if in_use {
            return Err(RepositoryError::Conflict(STORE_IN_USE.to_string()));
        }

        Ok(Some(tables.stores.remove(index)))
    }

    // =========================================================================
    // Products
    // =========================================================================

    async fn list_products(
        &self,
        store_id: &StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetails>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .products
            .iter()
            .rev()
            .filter(|p| &p.store_id == store_id && filter.matches(p))
            .map(|p| tables.product_details(p))
            .collect()
    }

    async fn find_product(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
    ) -> Result<Option<ProductDetails>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .products
            .iter()
            .find(|p| &p.store_id == store_id && &p.id == product_id)
            .map(|p| tables.product_details(p))
            .transpose()
    }

    async fn create_product(
        &self,
        store_id: &StoreId,
        input: &ProductInput,
    ) -> Result<ProductDetails, RepositoryError> {
        let mut tables = self.tables.write().await;
        tables.check_references(store_id, input)?;

        let now = Utc::now();
        let product = Product {
            id: ProductId::generate(),
            store_id: store_id.clone(),
            category_id: input.category_id.clone(),
            size_id: input.size_id.clone(),
            color_id: input.color_id.clone(),
            name: input.name.clone(),
            price: input.price,
            is_featured: input.is_featured,
            is_archived: input.is_archived,
            created_at: now,
            updated_at: now,
        };
        tables.replace_images(&product.id, &input.image_urls);
        tables.products.push(product.clone());

        tables.product_details(&product)
    }

    async fn update_product(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
        input: &ProductInput,
    ) -> Result<Option<ProductDetails>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let is_match = |p: &Product| &p.store_id == store_id && &p.id == product_id;
        if !tables.products.iter().any(is_match) {
            return Ok(None);
        }

        // Validate before touching anything so a failure leaves no trace.
        tables.check_references(store_id, input)?;

        let product = tables
            .products
            .iter_mut()
            .find(|p| is_match(&**p))
            .ok_or(RepositoryError::NotFound)?;
        product.name.clone_from(&input.name);
        product.price = input.price;
        product.category_id = input.category_id.clone();
        product.size_id = input.size_id.clone();
        product.color_id = input.color_id.clone();
        product.is_featured = input.is_featured;
        product.is_archived = input.is_archived;
        product.updated_at = Utc::now();
        let product = product.clone();

        tables.replace_images(product_id, &input.image_urls);
        tables.product_details(&product).map(Some)
    }

    async fn delete_product(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .products
            .iter()
            .position(|p| &p.store_id == store_id && &p.id == product_id)
        else {
            return Ok(None);
        };

        tables.images.retain(|image| &image.product_id != product_id);
        Ok(Some(tables.products.remove(index)))
    }

    // =========================================================================
    // Heroes
    // =========================================================================

    async fn list_heroes(&self, store_id: &StoreId) -> Result<Vec<Hero>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .heroes
            .iter()
            .rev()
            .filter(|h| &h.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn find_hero(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
    ) -> Result<Option<Hero>, RepositoryError> {
        Ok(self.tables.read().await.hero(store_id, hero_id).cloned())
    }

    async fn create_hero(
        &self,
        store_id: &StoreId,
        input: &HeroInput,
    ) -> Result<Hero, RepositoryError> {
        let now = Utc::now();
        let hero = Hero {
            id: HeroId::generate(),
            store_id: store_id.clone(),
            label: input.label.clone(),
            image_url: input.image_url.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.heroes.push(hero.clone());
        Ok(hero)
    }

    async fn update_hero(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
        input: &HeroInput,
    ) -> Result<Option<Hero>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(hero) = tables
            .heroes
            .iter_mut()
            .find(|h| &h.store_id == store_id && &h.id == hero_id)
        else {
            return Ok(None);
        };

        hero.label.clone_from(&input.label);
        hero.image_url.clone_from(&input.image_url);
        hero.updated_at = Utc::now();
        Ok(Some(hero.clone()))
    }

    async fn delete_hero(
        &self,
        store_id: &StoreId,
        hero_id: &HeroId,
    ) -> Result<Option<Hero>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .heroes
            .iter()
            .position(|h| &h.store_id == store_id && &h.id == hero_id)
        else {
            return Ok(None);
        };

        if tables.categories.iter().any(|c| &c.hero_id == hero_id) {
            return Err(RepositoryError::Conflict(HERO_IN_USE.to_string()));
        }

        Ok(Some(tables.heroes.remove(index)))
    }

    // =========================================================================
    // Categories
    // =========================================================================

    async fn list_categories(
        &self,
        store_id: &StoreId,
    ) -> Result<Vec<CategoryDetails>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .categories
            .iter()
            .rev()
            .filter(|c| &c.store_id == store_id)
            .map(|c| tables.category_details(c))
            .collect()
    }

    async fn find_category(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
    ) -> Result<Option<CategoryDetails>, RepositoryError> {
        let tables = self.tables.read().await;
        tables
            .category(store_id, category_id)
            .map(|c| tables.category_details(c))
            .transpose()
    }

    async fn create_category(
        &self,
        store_id: &StoreId,
        input: &CategoryInput,
    ) -> Result<CategoryDetails, RepositoryError> {
        let mut tables = self.tables.write().await;
        if tables.hero(store_id, &input.hero_id).is_none() {
            return Err(RepositoryError::InvalidReference("hero id"));
        }

        let now = Utc::now();
        let category = Category {
            id: CategoryId::generate(),
            store_id: store_id.clone(),
            hero_id: input.hero_id.clone(),
            name: input.name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        tables.category_details(&category)
    }

    async fn update_category(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
        input: &CategoryInput,
    ) -> Result<Option<CategoryDetails>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let is_match = |c: &Category| &c.store_id == store_id && &c.id == category_id;
        if !tables.categories.iter().any(is_match) {
            return Ok(None);
        }

        if tables.hero(store_id, &input.hero_id).is_none() {
            return Err(RepositoryError::InvalidReference("hero id"));
        }

        let category = tables
            .categories
            .iter_mut()
            .find(|c| is_match(&**c))
            .ok_or(RepositoryError::NotFound)?;
        category.name.clone_from(&input.name);
        category.hero_id = input.hero_id.clone();
        category.updated_at = Utc::now();
        let category = category.clone();

        tables.category_details(&category).map(Some)
    }

    async fn delete_category(
        &self,
        store_id: &StoreId,
        category_id: &CategoryId,
    ) -> Result<Option<CategoryDetails>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .categories
            .iter()
            .position(|c| &c.store_id == store_id && &c.id == category_id)
        else {
            return Ok(None);
        };

        if tables.products.iter().any(|p| &p.category_id == category_id) {
            return Err(RepositoryError::Conflict(CATEGORY_IN_USE.to_string()));
        }

        let details = match tables.categories.get(index) {
            Some(category) => tables.category_details(category)?,
            None => return Ok(None),
        };
        tables.categories.remove(index);
        Ok(Some(details))
    }

    // =========================================================================
    // Sizes
    // =========================================================================

    async fn list_sizes(&self, store_id: &StoreId) -> Result<Vec<Size>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .sizes
            .iter()
            .rev()
            .filter(|s| &s.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn find_size(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        Ok(self.tables.read().await.size(store_id, size_id).cloned())
    }

    async fn create_size(
        &self,
        store_id: &StoreId,
        input: &SizeInput,
    ) -> Result<Size, RepositoryError> {
        let now = Utc::now();
        let size = Size {
            id: SizeId::generate(),
            store_id: store_id.clone(),
            name: input.name.clone(),
            value: input.value.clone(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.sizes.push(size.clone());
        Ok(size)
    }

    async fn update_size(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
        input: &SizeInput,
    ) -> Result<Option<Size>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(size) = tables
            .sizes
            .iter_mut()
            .find(|s| &s.store_id == store_id && &s.id == size_id)
        else {
            return Ok(None);
        };

        size.name.clone_from(&input.name);
        size.value.clone_from(&input.value);
        size.updated_at = Utc::now();
        Ok(Some(size.clone()))
    }

    async fn delete_size(
        &self,
        store_id: &StoreId,
        size_id: &SizeId,
    ) -> Result<Option<Size>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .sizes
            .iter()
            .position(|s| &s.store_id == store_id && &s.id == size_id)
        else {
            return Ok(None);
        };

        if tables.products.iter().any(|p| &p.size_id == size_id) {
            return Err(RepositoryError::Conflict(SIZE_IN_USE.to_string()));
        }

        Ok(Some(tables.sizes.remove(index)))
    }

    // =========================================================================
    // Colors
    // =========================================================================

    async fn list_colors(&self, store_id: &StoreId) -> Result<Vec<Color>, RepositoryError> {
        let tables = self.tables.read().await;
        Ok(tables
            .colors
            .iter()
            .rev()
            .filter(|c| &c.store_id == store_id)
            .cloned()
            .collect())
    }

    async fn find_color(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        Ok(self.tables.read().await.color(store_id, color_id).cloned())
    }

    async fn create_color(
        &self,
        store_id: &StoreId,
        input: &ColorInput,
    ) -> Result<Color, RepositoryError> {
        let now = Utc::now();
        let color = Color {
            id: ColorId::generate(),
            store_id: store_id.clone(),
            name: input.name.clone(),
            value: input.value.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.tables.write().await.colors.push(color.clone());
        Ok(color)
    }

    async fn update_color(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
        input: &ColorInput,
    ) -> Result<Option<Color>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(color) = tables
            .colors
            .iter_mut()
            .find(|c| &c.store_id == store_id && &c.id == color_id)
        else {
            return Ok(None);
        };

        color.name.clone_from(&input.name);
        color.value = input.value.to_string();
        color.updated_at = Utc::now();
        Ok(Some(color.clone()))
    }

    async fn delete_color(
        &self,
        store_id: &StoreId,
        color_id: &ColorId,
    ) -> Result<Option<Color>, RepositoryError> {
        let mut tables = self.tables.write().await;
        let Some(index) = tables
            .colors
            .iter()
            .position(|c| &c.store_id == store_id && &c.id == color_id)
        else {
            return Ok(None);
        };

        if tables.products.iter().any(|p| &p.color_id == color_id) {
            return Err(RepositoryError::Conflict(COLOR_IN_USE.to_string()));
        }

        Ok(Some(tables.colors.remove(index)))
    }
}

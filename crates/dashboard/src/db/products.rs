//! Product repository.
//!
//! A product's scalar fields live in `dashboard.product` and its images in
//! `dashboard.image`. Writes that touch both run in a single transaction, so
//! readers never observe a product with a half-replaced image set.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};

use duka_kuu_core::{
    CategoryId, ColorId, HeroId, ImageId, Price, ProductId, SizeId, StoreId,
};

use super::RepositoryError;
use super::colors::ColorRow;
use super::sizes::SizeRow;
use crate::models::{
    Category, Color, Image, Product, ProductDetails, ProductFilter, ProductInput, Size,
};

// =============================================================================
// Internal Row Types
// =============================================================================

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    store_id: String,
    category_id: String,
    size_id: String,
    color_id: String,
    name: String,
    price: Decimal,
    is_featured: bool,
    is_archived: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", row.id))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            store_id: StoreId::new(row.store_id),
            category_id: CategoryId::new(row.category_id),
            size_id: SizeId::new(row.size_id),
            color_id: ColorId::new(row.color_id),
            name: row.name,
            price,
            is_featured: row.is_featured,
            is_archived: row.is_archived,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: String,
    product_id: String,
    url: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ImageRow> for Image {
    fn from(row: ImageRow) -> Self {
        Self {
            id: ImageId::new(row.id),
            product_id: ProductId::new(row.product_id),
            url: row.url,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct CategoryRow {
    id: String,
    store_id: String,
    hero_id: String,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            store_id: StoreId::new(row.store_id),
            hero_id: HeroId::new(row.hero_id),
            name: row.name,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PRODUCT_COLUMNS: &str = "id, store_id, category_id, size_id, color_id, name, price, \
                               is_featured, is_archived, created_at, updated_at";

// =============================================================================
// Repository
// =============================================================================

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List a store's unarchived products matching `filter`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn list(
        &self,
        store_id: &StoreId,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductDetails>, RepositoryError> {
        let sql = format!(
            "SELECT {PRODUCT_COLUMNS} FROM dashboard.product
             WHERE store_id = $1
               AND NOT is_archived
               AND ($2::text IS NULL OR category_id = $2)
               AND ($3::text IS NULL OR color_id = $3)
               AND ($4::text IS NULL OR size_id = $4)
               AND ($5::boolean IS NULL OR is_featured = $5)
             ORDER BY created_at DESC"
        );
        let rows = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(store_id.as_str())
            .bind(filter.category_id.as_ref().map(CategoryId::as_str))
            .bind(filter.color_id.as_ref().map(ColorId::as_str))
            .bind(filter.size_id.as_ref().map(SizeId::as_str))
            .bind(filter.is_featured)
            .fetch_all(self.pool)
            .await?;

        let products = rows
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let mut conn = self.pool.acquire().await?;
        hydrate(&mut conn, store_id, products).await
    }

    /// Get a product with its images, category, size and color.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if a query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored row is invalid.
    pub async fn get_details(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
    ) -> Result<Option<ProductDetails>, RepositoryError> {
        let mut conn = self.pool.acquire().await?;
        let Some(product) = fetch_product(&mut conn, store_id, product_id).await? else {
            return Ok(None);
        };

        let mut details = hydrate(&mut conn, store_id, vec![product]).await?;
        Ok(details.pop())
    }

    /// Create a product and its images.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the category, color or
    /// size does not belong to the store.
    /// Returns `RepositoryError::Database` if a write fails.
    pub async fn create(
        &self,
        store_id: &StoreId,
        input: &ProductInput,
    ) -> Result<ProductDetails, RepositoryError> {
        let product_id = ProductId::generate();
        let mut tx = self.pool.begin().await?;

        check_references(&mut tx, store_id, input).await?;

        sqlx::query(
            r"
            INSERT INTO dashboard.product
                (id, store_id, category_id, size_id, color_id, name, price, is_featured, is_archived)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ",
        )
        .bind(product_id.as_str())
        .bind(store_id.as_str())
        .bind(input.category_id.as_str())
        .bind(input.size_id.as_str())
        .bind(input.color_id.as_str())
        .bind(&input.name)
        .bind(input.price.amount())
        .bind(input.is_featured)
        .bind(input.is_archived)
        .execute(&mut *tx)
        .await?;

        insert_images(&mut tx, &product_id, &input.image_urls).await?;
        tx.commit().await?;

        self.get_details(store_id, &product_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    /// Update a product and replace its whole image set.
    ///
    /// Image ids are regenerated on every call. Returns `None` when the
    /// product does not exist in the store.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::InvalidReference` if the category, color or
    /// size does not belong to the store.
    /// Returns `RepositoryError::Database` if a write fails. Nothing is
    /// persisted in that case.
    pub async fn update(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
        input: &ProductInput,
    ) -> Result<Option<ProductDetails>, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let locked: Option<(String,)> = sqlx::query_as(
            "SELECT id FROM dashboard.product WHERE store_id = $1 AND id = $2 FOR UPDATE",
        )
        .bind(store_id.as_str())
        .bind(product_id.as_str())
        .fetch_optional(&mut *tx)
        .await?;

        if locked.is_none() {
            return Ok(None);
        }

        check_references(&mut tx, store_id, input).await?;

        sqlx::query(
            r"
            UPDATE dashboard.product
            SET name = $3, price = $4, category_id = $5, size_id = $6, color_id = $7,
                is_featured = $8, is_archived = $9, updated_at = NOW()
            WHERE store_id = $1 AND id = $2
            ",
        )
        .bind(store_id.as_str())
        .bind(product_id.as_str())
        .bind(&input.name)
        .bind(input.price.amount())
        .bind(input.category_id.as_str())
        .bind(input.size_id.as_str())
        .bind(input.color_id.as_str())
        .bind(input.is_featured)
        .bind(input.is_archived)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM dashboard.image WHERE product_id = $1")
            .bind(product_id.as_str())
            .execute(&mut *tx)
            .await?;

        insert_images(&mut tx, product_id, &input.image_urls).await?;
        tx.commit().await?;

        self.get_details(store_id, product_id).await
    }

    /// Delete a product. Its images are removed by cascade.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(
        &self,
        store_id: &StoreId,
        product_id: &ProductId,
    ) -> Result<Option<Product>, RepositoryError> {
        let sql = format!(
            "DELETE FROM dashboard.product WHERE store_id = $1 AND id = $2 \
             RETURNING {PRODUCT_COLUMNS}"
        );
        let row = sqlx::query_as::<_, ProductRow>(&sql)
            .bind(store_id.as_str())
            .bind(product_id.as_str())
            .fetch_optional(self.pool)
            .await?;

        row.map(TryInto::try_into).transpose()
    }
}

// =============================================================================
// Helpers
// =============================================================================

async fn fetch_product(
    conn: &mut PgConnection,
    store_id: &StoreId,
    product_id: &ProductId,
) -> Result<Option<Product>, RepositoryError> {
    let sql = format!(
        "SELECT {PRODUCT_COLUMNS} FROM dashboard.product WHERE store_id = $1 AND id = $2"
    );
    let row = sqlx::query_as::<_, ProductRow>(&sql)
        .bind(store_id.as_str())
        .bind(product_id.as_str())
        .fetch_optional(&mut *conn)
        .await?;

    row.map(TryInto::try_into).transpose()
}

/// Reject a product whose category, color or size lives in another store.
async fn check_references(
    conn: &mut PgConnection,
    store_id: &StoreId,
    input: &ProductInput,
) -> Result<(), RepositoryError> {
    let (category_ok, color_ok, size_ok): (bool, bool, bool) = sqlx::query_as(
        r"
        SELECT
            EXISTS (SELECT 1 FROM dashboard.category WHERE store_id = $1 AND id = $2),
            EXISTS (SELECT 1 FROM dashboard.color WHERE store_id = $1 AND id = $3),
            EXISTS (SELECT 1 FROM dashboard.size WHERE store_id = $1 AND id = $4)
        ",
    )
    .bind(store_id.as_str())
    .bind(input.category_id.as_str())
    .bind(input.color_id.as_str())
    .bind(input.size_id.as_str())
    .fetch_one(&mut *conn)
    .await?;

    if !category_ok {
        return Err(RepositoryError::InvalidReference("category id"));
    }
    if !color_ok {
        return Err(RepositoryError::InvalidReference("color id"));
    }
    if !size_ok {
        return Err(RepositoryError::InvalidReference("size id"));
    }
    Ok(())
}

async fn insert_images(
    conn: &mut PgConnection,
    product_id: &ProductId,
    urls: &[String],
) -> Result<(), RepositoryError> {
    for (position, url) in (0_i32..).zip(urls) {
        sqlx::query(
            r"
            INSERT INTO dashboard.image (id, product_id, url, position)
            VALUES ($1, $2, $3, $4)
            ",
        )
        .bind(ImageId::generate().as_str())
        .bind(product_id.as_str())
        .bind(url)
        .bind(position)
        .execute(&mut *conn)
        .await?;
    }
    Ok(())
}

/// Attach images, category, size and color to each product.
///
/// Runs a fixed number of queries regardless of how many products are passed.
async fn hydrate(
    conn: &mut PgConnection,
    store_id: &StoreId,
    products: Vec<Product>,
) -> Result<Vec<ProductDetails>, RepositoryError> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let product_ids: Vec<String> = products.iter().map(|p| p.id.to_string()).collect();

    let image_rows = sqlx::query_as::<_, ImageRow>(
        r"
        SELECT id, product_id, url, created_at, updated_at
        FROM dashboard.image
        WHERE product_id = ANY($1)
        ORDER BY product_id, position
        ",
    )
    .bind(&product_ids)
    .fetch_all(&mut *conn)
    .await?;

    let mut images: HashMap<ProductId, Vec<Image>> = HashMap::new();
    for row in image_rows {
        let image = Image::from(row);
        images.entry(image.product_id.clone()).or_default().push(image);
    }

    let categories: HashMap<CategoryId, Category> = sqlx::query_as::<_, CategoryRow>(
        r"
        SELECT id, store_id, hero_id, name, created_at, updated_at
        FROM dashboard.category WHERE store_id = $1
        ",
    )
    .bind(store_id.as_str())
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|row| {
        let category = Category::from(row);
        (category.id.clone(), category)
    })
    .collect();

    let sizes: HashMap<SizeId, Size> = sqlx::query_as::<_, SizeRow>(
        r"
        SELECT id, store_id, name, value, created_at, updated_at
        FROM dashboard.size WHERE store_id = $1
        ",
    )
    .bind(store_id.as_str())
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|row| {
        let size = Size::from(row);
        (size.id.clone(), size)
    })
    .collect();

    let colors: HashMap<ColorId, Color> = sqlx::query_as::<_, ColorRow>(
        r"
        SELECT id, store_id, name, value, created_at, updated_at
        FROM dashboard.color WHERE store_id = $1
        ",
    )
    .bind(store_id.as_str())
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .map(|row| {
        let color = Color::from(row);
        (color.id.clone(), color)
    })
    .collect();

    products
        .into_iter()
        .map(|product| {
            let missing = |what: &str| {
                RepositoryError::DataCorruption(format!(
                    "product {} references a missing {what}",
                    product.id
                ))
            };
            let category = categories
                .get(&product.category_id)
                .cloned()
                .ok_or_else(|| missing("category"))?;
            let size = sizes
                .get(&product.size_id)
                .cloned()
                .ok_or_else(|| missing("size"))?;
            let color = colors
                .get(&product.color_id)
                .cloned()
                .ok_or_else(|| missing("color"))?;
            let images = images.remove(&product.id).unwrap_or_default();

            Ok(ProductDetails {
                product,
                images,
                category,
                size,
                color,
            })
        })
        .collect()
}

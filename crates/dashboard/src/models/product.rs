//! Product domain models.
//!
//! A product belongs to one store and references a category, size and color
//! of that same store. Its images form an ordered set that is always replaced
//! as a whole.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use duka_kuu_core::{CategoryId, ColorId, ImageId, Price, ProductId, SizeId, StoreId};

use super::{Category, Color, Size};

/// A product row (scalar fields only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub store_id: StoreId,
    pub category_id: CategoryId,
    pub size_id: SizeId,
    pub color_id: ColorId,
    pub name: String,
    pub price: Price,
    /// Shown on the storefront home page.
    pub is_featured: bool,
    /// Hidden from the storefront but kept for order history.
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ImageId,
    pub product_id: ProductId,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A product with its images, category, size and color loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    #[serde(flatten)]
    pub product: Product,
    pub images: Vec<Image>,
    pub category: Category,
    pub size: Size,
    pub color: Color,
}

/// Validated input for creating or updating a product.
///
/// `image_urls` is the complete new image set, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductInput {
    pub name: String,
    pub price: Price,
    pub category_id: CategoryId,
    pub size_id: SizeId,
    pub color_id: ColorId,
    pub image_urls: Vec<String>,
    pub is_featured: bool,
    pub is_archived: bool,
}

/// Filters for listing a store's products.
///
/// Archived products are never listed. A blank id (`?categoryId=`) means no
/// filter on that field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(default, deserialize_with = "blank_as_none")]
    pub category_id: Option<CategoryId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub color_id: Option<ColorId>,
    #[serde(default, deserialize_with = "blank_as_none")]
    pub size_id: Option<SizeId>,
    pub is_featured: Option<bool>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<String>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()).map(T::from))
}

impl ProductFilter {
    /// Whether `product` passes this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        !product.is_archived
            && self
                .category_id
                .as_ref()
                .is_none_or(|id| id == &product.category_id)
            && self.color_id.as_ref().is_none_or(|id| id == &product.color_id)
            && self.size_id.as_ref().is_none_or(|id| id == &product.size_id)
            && self.is_featured.is_none_or(|f| f == product.is_featured)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_treats_blank_ids_as_absent() {
        let filter: ProductFilter =
            serde_json::from_str(r#"{"categoryId": "", "colorId": "  ", "sizeId": null}"#).unwrap();
        assert_eq!(filter, ProductFilter::default());
    }

    #[test]
    fn test_filter_keeps_given_ids() {
        let filter: ProductFilter =
            serde_json::from_str(r#"{"categoryId": "c1", "isFeatured": true}"#).unwrap();
        assert_eq!(filter.category_id, Some(CategoryId::new("c1")));
        assert_eq!(filter.color_id, None);
        assert_eq!(filter.is_featured, Some(true));
    }
}

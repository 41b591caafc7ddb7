//! Product and category records.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId, StoreId};
use super::timestamp;

/// A product listed by a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub store_id: Option<StoreId>,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default = "default_true")]
    pub active: bool,
    #[serde(default)]
    pub average_rating: Option<f64>,
    #[serde(default, with = "timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether the product can currently be ordered.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.active && self.stock > 0
    }
}

/// A product category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_product_defaults() {
        let product: Product = serde_json::from_str(r#"{"id": 4, "name": "Tea"}"#).unwrap();
        assert!(product.active);
        assert_eq!(product.stock, 0);
        assert!(!product.in_stock());
    }

    #[test]
    fn test_product_price_accepts_string_or_number() {
        let a: Product = serde_json::from_str(r#"{"id": 1, "name": "A", "price": 12.5}"#).unwrap();
        let b: Product =
            serde_json::from_str(r#"{"id": 2, "name": "B", "price": "12.50"}"#).unwrap();
        assert_eq!(a.price, b.price);
    }

    #[test]
    fn test_category_parent() {
        let category: Category =
            serde_json::from_str(r#"{"id": 2, "name": "Teas", "parentId": 1}"#).unwrap();
        assert_eq!(category.parent_id, Some(CategoryId::new(1)));
    }
}

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ProductSort;

/// Core catalog product model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub category_id: i64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request model for creating a new product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub discount_price: Option<Decimal>,
    pub category_id: i64,
    pub image_url: Option<String>,
}

/// Request model for editing an existing product.
///
/// Every field is overwritten on edit: name, description, price, category
/// and image URL. The discount price and the creation timestamp are not
/// editable through this path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditProductRequest {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: i64,
    pub image_url: Option<String>,
}

/// Filters for the product listing; an absent field applies no restriction
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ProductFilters {
    pub category_id: Option<i64>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub discount: Option<bool>,
    pub sort: Option<ProductSort>,
}

/// Response model for product listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub total_count: usize,
}

impl Product {
    /// A product is discounted when a discount price is set
    pub fn has_discount(&self) -> bool {
        self.discount_price.is_some()
    }

    /// Overwrite the editable fields from an edit request and stamp the
    /// update time. Id, creation time and discount price are left as they
    /// are.
    pub fn apply_edit(&mut self, request: EditProductRequest) {
        self.name = request.name;
        self.description = request.description;
        self.price = request.price;
        self.category_id = request.category_id;
        self.image_url = request.image_url;
        self.updated_at = Utc::now();
    }

    /// Check whether the product matches the given filters
    pub fn matches_filters(&self, filters: &ProductFilters) -> bool {
        if let Some(category_id) = filters.category_id {
            if self.category_id != category_id {
                return false;
            }
        }

        if let Some(min_price) = &filters.min_price {
            if &self.price < min_price {
                return false;
            }
        }

        if let Some(max_price) = &filters.max_price {
            if &self.price > max_price {
                return false;
            }
        }

        if let Some(discount) = filters.discount {
            if self.has_discount() != discount {
                return false;
            }
        }

        true
    }
}

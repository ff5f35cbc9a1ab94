use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-user shopping cart. The cart's items live in their own table and are
/// always read back from storage; the cart row itself carries no item list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cart {
    pub id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A (product, quantity) pairing attached to exactly one cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CartItem {
    pub id: i64,
    pub cart_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub added_at: DateTime<Utc>,
}

/// Fields for inserting a new cart item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCartItem {
    pub cart_id: i64,
    pub product_id: i64,
    pub quantity: i32,
}

/// Request model for adding a product to a user's cart
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i64,
    pub quantity: i32,
}

/// Response model for a cart's item listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartItemListResponse {
    pub cart_id: i64,
    pub items: Vec<CartItem>,
    pub total_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cart_item_serde_roundtrip() {
        let item = CartItem {
            id: 10,
            cart_id: 2,
            product_id: 7,
            quantity: 3,
            added_at: Utc::now(),
        };

        let json = serde_json::to_string(&item).unwrap();
        let deserialized: CartItem = serde_json::from_str(&json).unwrap();

        assert_eq!(item, deserialized);
    }

    #[test]
    fn test_add_to_cart_request_deserialization() {
        let json = r#"{"product_id": 7, "quantity": 2}"#;
        let request: AddToCartRequest = serde_json::from_str(json).unwrap();

        assert_eq!(request.product_id, 7);
        assert_eq!(request.quantity, 2);
    }
}

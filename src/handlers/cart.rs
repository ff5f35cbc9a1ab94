use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::CartItemListResponse;
use crate::services::CartItemsService;

use super::service_error_to_response;

#[derive(Clone)]
pub struct CartState {
    pub cart_items_service: Arc<CartItemsService>,
}

/// Create router for cart item endpoints
pub fn create_cart_router(cart_items_service: Arc<CartItemsService>) -> Router {
    let state = CartState { cart_items_service };

    Router::new()
        .route("/api/carts/:cart_id/items", get(list_cart_items))
        .route("/api/cart-items/:item_id", delete(delete_cart_item))
        .with_state(state)
}

/// List the items of a cart
#[instrument(name = "list_cart_items", skip(state), fields(cart_id = %cart_id))]
pub async fn list_cart_items(
    State(state): State<CartState>,
    Path(cart_id): Path<i64>,
) -> Result<Json<CartItemListResponse>, (StatusCode, Json<Value>)> {
    info!("Listing items for cart: {}", cart_id);

    match state.cart_items_service.get_list_of_items(cart_id).await {
        Ok(items) => {
            info!("Successfully listed {} cart items", items.len());
            Ok(Json(CartItemListResponse {
                cart_id,
                total_count: items.len(),
                items,
            }))
        }
        Err(err) => {
            error!("Failed to list items for cart {}: {}", cart_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Remove a cart item
#[instrument(name = "delete_cart_item", skip(state), fields(item_id = %item_id))]
pub async fn delete_cart_item(
    State(state): State<CartState>,
    Path(item_id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    info!("Deleting cart item: {}", item_id);

    match state.cart_items_service.delete_item_by_id(item_id).await {
        Ok(()) => {
            info!("Successfully deleted cart item");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            error!("Failed to delete cart item {}: {}", item_id, err);
            Err(service_error_to_response(err))
        }
    }
}

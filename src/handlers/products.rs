use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{
    AddToCartRequest, CartItem, CreateProductRequest, EditProductRequest, Product, ProductFilters,
    ProductListResponse,
};
use crate::services::ProductService;

use super::service_error_to_response;

/// Shared state for the product and cart mutation endpoints
#[derive(Clone)]
pub struct ProductsState {
    pub product_service: Arc<ProductService>,
}

/// Query parameters for listing products
#[derive(Debug, Deserialize)]
pub struct ListProductsQuery {
    pub category_id: Option<i64>,
    pub min_price: Option<rust_decimal::Decimal>,
    pub max_price: Option<rust_decimal::Decimal>,
    pub discount: Option<bool>,
    pub sort: Option<String>,
}

/// Create router for product endpoints
pub fn create_products_router(product_service: Arc<ProductService>) -> Router {
    let state = ProductsState { product_service };

    Router::new()
        .route("/api/products", get(list_products).post(create_product))
        .route(
            "/api/products/:product_id",
            get(get_product).put(update_product).delete(delete_product),
        )
        .route("/api/users/:user_id/cart/items", post(add_product_to_cart))
        .with_state(state)
}

/// List products with optional filters
#[instrument(name = "list_products", skip(state), fields(
    category_id = query.category_id,
    discount = query.discount,
    sort = query.sort.as_deref(),
))]
pub async fn list_products(
    State(state): State<ProductsState>,
    Query(query): Query<ListProductsQuery>,
) -> Result<Json<ProductListResponse>, (StatusCode, Json<Value>)> {
    info!("Listing products with filters");

    let filters = match query_to_filters(query) {
        Ok(filters) => filters,
        Err(err) => {
            error!("Invalid query parameters: {}", err);
            return Err((
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "error": "Invalid query parameters",
                    "message": err,
                    "timestamp": chrono::Utc::now().to_rfc3339(),
                })),
            ));
        }
    };

    match state.product_service.get_filtered_products(filters).await {
        Ok(response) => {
            info!("Successfully listed {} products", response.total_count);
            Ok(Json(response))
        }
        Err(err) => {
            error!("Failed to list products: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Get a specific product by id
#[instrument(name = "get_product", skip(state), fields(product_id = %product_id))]
pub async fn get_product(
    State(state): State<ProductsState>,
    Path(product_id): Path<i64>,
) -> Result<Json<Product>, (StatusCode, Json<Value>)> {
    info!("Getting product with id: {}", product_id);

    match state.product_service.find_product_by_id(product_id).await {
        Ok(product) => {
            info!("Successfully retrieved product: {}", product.name);
            Ok(Json(product))
        }
        Err(err) => {
            error!("Failed to get product {}: {}", product_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Create a new product
#[instrument(name = "create_product", skip(state, request), fields(
    name = %request.name,
    category_id = %request.category_id,
))]
pub async fn create_product(
    State(state): State<ProductsState>,
    Json(request): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<Product>), (StatusCode, Json<Value>)> {
    info!("Creating product");

    match state.product_service.create_product(request).await {
        Ok(product) => {
            info!("Successfully created product with id {}", product.id);
            Ok((StatusCode::CREATED, Json(product)))
        }
        Err(err) => {
            error!("Failed to create product: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Update a product's editable fields
#[instrument(name = "update_product", skip(state, request), fields(
    product_id = %product_id,
    name = %request.name,
))]
pub async fn update_product(
    State(state): State<ProductsState>,
    Path(product_id): Path<i64>,
    Json(request): Json<EditProductRequest>,
) -> Result<Json<Product>, (StatusCode, Json<Value>)> {
    info!("Updating product");

    match state.product_service.edit_product(product_id, request).await {
        Ok(product) => {
            info!("Successfully updated product");
            Ok(Json(product))
        }
        Err(err) => {
            error!("Failed to update product {}: {}", product_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Delete a product
#[instrument(name = "delete_product", skip(state), fields(product_id = %product_id))]
pub async fn delete_product(
    State(state): State<ProductsState>,
    Path(product_id): Path<i64>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    info!("Deleting product with id: {}", product_id);

    match state.product_service.delete_product(product_id).await {
        Ok(()) => {
            info!("Successfully deleted product");
            Ok(StatusCode::NO_CONTENT)
        }
        Err(err) => {
            error!("Failed to delete product {}: {}", product_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Add a product to a user's cart, creating the cart on first use
#[instrument(name = "add_product_to_cart", skip(state, request), fields(
    user_id = %user_id,
    product_id = %request.product_id,
    quantity = %request.quantity,
))]
pub async fn add_product_to_cart(
    State(state): State<ProductsState>,
    Path(user_id): Path<i64>,
    Json(request): Json<AddToCartRequest>,
) -> Result<(StatusCode, Json<CartItem>), (StatusCode, Json<Value>)> {
    info!(
        "Adding product to cart for user: {}, product_id: {}, quantity: {}",
        user_id, request.product_id, request.quantity
    );

    let product = match state
        .product_service
        .find_product_by_id(request.product_id)
        .await
    {
        Ok(product) => product,
        Err(err) => {
            error!("Failed to resolve product {}: {}", request.product_id, err);
            return Err(service_error_to_response(err));
        }
    };

    match state
        .product_service
        .add_product_to_cart(product, request.quantity, user_id)
        .await
    {
        Ok(item) => {
            info!("Successfully added product to cart");
            Ok((StatusCode::CREATED, Json(item)))
        }
        Err(err) => {
            error!("Failed to add product to cart: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Convert query parameters to ProductFilters
fn query_to_filters(query: ListProductsQuery) -> Result<ProductFilters, String> {
    let mut filters = ProductFilters::default();

    filters.category_id = query.category_id;
    filters.min_price = query.min_price;
    filters.max_price = query.max_price;
    filters.discount = query.discount;

    if let Some(sort_str) = query.sort {
        filters.sort = Some(sort_str.parse().map_err(|e| format!("Invalid sort: {}", e))?);
    }

    Ok(filters)
}

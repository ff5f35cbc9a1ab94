use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info, instrument};

use crate::models::{Category, CategoryListResponse, CreateCategoryRequest, EditCategoryRequest};
use crate::services::CategoryService;

use super::service_error_to_response;

#[derive(Clone)]
pub struct CategoriesState {
    pub category_service: Arc<CategoryService>,
}

/// Create router for category endpoints
pub fn create_categories_router(category_service: Arc<CategoryService>) -> Router {
    let state = CategoriesState { category_service };

    Router::new()
        .route(
            "/api/categories",
            get(list_categories).post(create_category),
        )
        .route(
            "/api/categories/:category_id",
            get(get_category).put(update_category).delete(delete_category),
        )
        .with_state(state)
}

/// List all categories
#[instrument(name = "list_categories", skip(state))]
pub async fn list_categories(
    State(state): State<CategoriesState>,
) -> Result<Json<CategoryListResponse>, (StatusCode, Json<Value>)> {
    info!("Listing categories");

    match state.category_service.get_all_categories().await {
        Ok(categories) => {
            info!("Successfully listed {} categories", categories.len());
            Ok(Json(CategoryListResponse {
                total_count: categories.len(),
                categories,
            }))
        }
        Err(err) => {
            error!("Failed to list categories: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Get a category by id
#[instrument(name = "get_category", skip(state), fields(category_id = %category_id))]
pub async fn get_category(
    State(state): State<CategoriesState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Category>, (StatusCode, Json<Value>)> {
    info!("Getting category with id: {}", category_id);

    match state.category_service.find_category_by_id(category_id).await {
        Ok(category) => Ok(Json(category)),
        Err(err) => {
            error!("Failed to get category {}: {}", category_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Create a new category
#[instrument(name = "create_category", skip(state, request), fields(name = %request.name))]
pub async fn create_category(
    State(state): State<CategoriesState>,
    Json(request): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<Category>), (StatusCode, Json<Value>)> {
    info!("Creating category");

    match state.category_service.create_category(request).await {
        Ok(category) => {
            info!("Successfully created category with id {}", category.id);
            Ok((StatusCode::CREATED, Json(category)))
        }
        Err(err) => {
            error!("Failed to create category: {}", err);
            Err(service_error_to_response(err))
        }
    }
}

/// Rename a category
#[instrument(name = "update_category", skip(state, request), fields(
    category_id = %category_id,
    name = %request.name,
))]
pub async fn update_category(
    State(state): State<CategoriesState>,
    Path(category_id): Path<i64>,
    Json(request): Json<EditCategoryRequest>,
) -> Result<Json<Category>, (StatusCode, Json<Value>)> {
    info!("Updating category");

    match state
        .category_service
        .edit_category(category_id, request)
        .await
    {
        Ok(category) => {
            info!("Successfully updated category");
            Ok(Json(category))
        }
        Err(err) => {
            error!("Failed to update category {}: {}", category_id, err);
            Err(service_error_to_response(err))
        }
    }
}

/// Delete a category, returning the deleted record
#[instrument(name = "delete_category", skip(state), fields(category_id = %category_id))]
pub async fn delete_category(
    State(state): State<CategoriesState>,
    Path(category_id): Path<i64>,
) -> Result<Json<Category>, (StatusCode, Json<Value>)> {
    info!("Deleting category with id: {}", category_id);

    match state
        .category_service
        .delete_category_by_id(category_id)
        .await
    {
        Ok(category) => {
            info!("Successfully deleted category");
            Ok(Json(category))
        }
        Err(err) => {
            error!("Failed to delete category {}: {}", category_id, err);
            Err(service_error_to_response(err))
        }
    }
}

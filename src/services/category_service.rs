use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    Category, CreateCategoryRequest, EditCategoryRequest, ServiceError, ServiceResult, Validate,
};
use crate::repositories::CategoryRepository;

/// Service for managing product categories
pub struct CategoryService {
    repository: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    pub fn new(repository: Arc<dyn CategoryRepository>) -> Self {
        Self { repository }
    }

    /// Create a new category
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_category(&self, request: CreateCategoryRequest) -> ServiceResult<Category> {
        info!("Creating category");

        request.validate()?;

        let created = self.repository.create(&request).await?;

        info!("Category created with id {}", created.id);
        Ok(created)
    }

    /// List all categories
    #[instrument(skip(self))]
    pub async fn get_all_categories(&self) -> ServiceResult<Vec<Category>> {
        info!("Fetching all categories");

        let categories = self.repository.find_all().await?;

        info!("Found {} categories", categories.len());
        Ok(categories)
    }

    /// Look up a single category by id
    #[instrument(skip(self), fields(id = %id))]
    pub async fn find_category_by_id(&self, id: i64) -> ServiceResult<Category> {
        info!("Fetching category");

        match self.repository.find_by_id(id).await? {
            Some(category) => Ok(category),
            None => {
                warn!("Category not found");
                Err(ServiceError::CategoryNotFound { id })
            }
        }
    }

    /// Rename an existing category
    #[instrument(skip(self, request), fields(id = %id))]
    pub async fn edit_category(
        &self,
        id: i64,
        request: EditCategoryRequest,
    ) -> ServiceResult<Category> {
        info!("Editing category");

        request.validate()?;

        let mut category = match self.repository.find_by_id(id).await? {
            Some(category) => category,
            None => {
                warn!("Category not found");
                return Err(ServiceError::CategoryNotFound { id });
            }
        };

        category.name = request.name;
        let updated = self.repository.update(&category).await?;

        info!("Category updated");
        Ok(updated)
    }

    /// Delete a category by id, returning the deleted record
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_category_by_id(&self, id: i64) -> ServiceResult<Category> {
        info!("Deleting category");

        let category = match self.repository.find_by_id(id).await? {
            Some(category) => category,
            None => {
                warn!("Category not deleted: {}", id);
                return Err(ServiceError::CategoryNotFound { id });
            }
        };

        self.repository.delete(id).await?;

        info!("Category deleted");
        Ok(category)
    }
}

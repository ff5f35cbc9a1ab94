use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{Category, CreateCategoryRequest, RepositoryResult};
use crate::observability::{DatabaseTracingMiddleware, Metrics};

/// Trait defining the interface for category data access operations
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List all categories ordered by name
    async fn find_all(&self) -> RepositoryResult<Vec<Category>>;

    /// Find a category by id
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Category>>;

    /// Insert a new category and return the stored row
    async fn create(&self, request: &CreateCategoryRequest) -> RepositoryResult<Category>;

    /// Persist an existing category and return the stored row
    async fn update(&self, category: &Category) -> RepositoryResult<Category>;

    /// Delete a category by id
    async fn delete(&self, id: i64) -> RepositoryResult<()>;
}

/// PostgreSQL implementation of the CategoryRepository trait
pub struct PgCategoryRepository {
    pool: PgPool,
    tracer: DatabaseTracingMiddleware,
}

impl PgCategoryRepository {
    pub fn new(pool: PgPool, metrics: Arc<Metrics>) -> Self {
        Self {
            pool,
            tracer: DatabaseTracingMiddleware::new(metrics),
        }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    #[instrument(skip(self))]
    async fn find_all(&self) -> RepositoryResult<Vec<Category>> {
        self.tracer
            .trace_operation("find_all", "categories", async {
                let categories = sqlx::query_as::<_, Category>(
                    "SELECT id, name FROM categories ORDER BY name, id",
                )
                .fetch_all(&self.pool)
                .await?;

                info!("Found {} categories", categories.len());
                Ok(categories)
            })
            .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Category>> {
        self.tracer
            .trace_operation("find_by_id", "categories", async {
                let category =
                    sqlx::query_as::<_, Category>("SELECT id, name FROM categories WHERE id = $1")
                        .bind(id)
                        .fetch_optional(&self.pool)
                        .await?;

                info!("Category lookup by id: found={}", category.is_some());
                Ok(category)
            })
            .await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create(&self, request: &CreateCategoryRequest) -> RepositoryResult<Category> {
        self.tracer
            .trace_operation("create", "categories", async {
                let category = sqlx::query_as::<_, Category>(
                    "INSERT INTO categories (name) VALUES ($1) RETURNING id, name",
                )
                .bind(&request.name)
                .fetch_one(&self.pool)
                .await?;

                info!("Category created with id {}", category.id);
                Ok(category)
            })
            .await
    }

    #[instrument(skip(self, category), fields(id = %category.id))]
    async fn update(&self, category: &Category) -> RepositoryResult<Category> {
        self.tracer
            .trace_operation("update", "categories", async {
                let updated = sqlx::query_as::<_, Category>(
                    "UPDATE categories SET name = $2 WHERE id = $1 RETURNING id, name",
                )
                .bind(category.id)
                .bind(&category.name)
                .fetch_one(&self.pool)
                .await?;

                info!("Category updated");
                Ok(updated)
            })
            .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        self.tracer
            .trace_operation("delete", "categories", async {
                sqlx::query("DELETE FROM categories WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                info!("Category deleted");
                Ok(())
            })
            .await
    }
}

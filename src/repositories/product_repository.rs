use async_trait::async_trait;
use sqlx::{PgPool, QueryBuilder};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{CreateProductRequest, Product, ProductFilters, RepositoryResult};
use crate::observability::{DatabaseTracingMiddleware, Metrics};

const PRODUCT_COLUMNS: &str =
    "id, name, description, price, discount_price, category_id, image_url, created_at, updated_at";

/// Trait defining the interface for product data access operations
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Find a product by id
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>>;

    /// Find products matching the given filters, in the requested order
    async fn find_filtered(&self, filters: &ProductFilters) -> RepositoryResult<Vec<Product>>;

    /// Insert a new product and return the stored row
    async fn create(&self, request: &CreateProductRequest) -> RepositoryResult<Product>;

    /// Persist all fields of an existing product and return the stored row
    async fn update(&self, product: &Product) -> RepositoryResult<Product>;

    /// Delete a product by id
    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    /// Check whether a product exists
    async fn exists(&self, id: i64) -> RepositoryResult<bool>;
}

/// PostgreSQL implementation of the ProductRepository trait
pub struct PgProductRepository {
    pool: PgPool,
    tracer: DatabaseTracingMiddleware,
}

impl PgProductRepository {
    pub fn new(pool: PgPool, metrics: Arc<Metrics>) -> Self {
        Self {
            pool,
            tracer: DatabaseTracingMiddleware::new(metrics),
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Product>> {
        self.tracer
            .trace_operation("find_by_id", "products", async {
                let product = sqlx::query_as::<_, Product>(&format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
                ))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

                info!("Product lookup by id: found={}", product.is_some());
                Ok(product)
            })
            .await
    }

    #[instrument(skip(self), fields(filters = ?filters))]
    async fn find_filtered(&self, filters: &ProductFilters) -> RepositoryResult<Vec<Product>> {
        self.tracer
            .trace_operation("find_filtered", "products", async {
                let mut query = QueryBuilder::new(format!(
                    "SELECT {PRODUCT_COLUMNS} FROM products WHERE TRUE"
                ));

                if let Some(category_id) = filters.category_id {
                    query.push(" AND category_id = ").push_bind(category_id);
                }
                if let Some(min_price) = filters.min_price {
                    query.push(" AND price >= ").push_bind(min_price);
                }
                if let Some(max_price) = filters.max_price {
                    query.push(" AND price <= ").push_bind(max_price);
                }
                if let Some(discount) = filters.discount {
                    if discount {
                        query.push(" AND discount_price IS NOT NULL");
                    } else {
                        query.push(" AND discount_price IS NULL");
                    }
                }

                // Sort keys map to fixed clauses, never to user-provided SQL
                let order_by = filters
                    .sort
                    .map_or("id ASC", |sort| sort.order_by_clause());
                query.push(" ORDER BY ").push(order_by);

                let products = query
                    .build_query_as::<Product>()
                    .fetch_all(&self.pool)
                    .await?;

                info!("Found {} filtered products", products.len());
                Ok(products)
            })
            .await
    }

    #[instrument(skip(self, request), fields(name = %request.name))]
    async fn create(&self, request: &CreateProductRequest) -> RepositoryResult<Product> {
        self.tracer
            .trace_operation("create", "products", async {
                let product = sqlx::query_as::<_, Product>(&format!(
                    "INSERT INTO products (name, description, price, discount_price, category_id, image_url) \
                     VALUES ($1, $2, $3, $4, $5, $6) \
                     RETURNING {PRODUCT_COLUMNS}"
                ))
                .bind(&request.name)
                .bind(&request.description)
                .bind(request.price)
                .bind(request.discount_price)
                .bind(request.category_id)
                .bind(&request.image_url)
                .fetch_one(&self.pool)
                .await?;

                info!("Product created with id {}", product.id);
                Ok(product)
            })
            .await
    }

    #[instrument(skip(self, product), fields(id = %product.id))]
    async fn update(&self, product: &Product) -> RepositoryResult<Product> {
        self.tracer
            .trace_operation("update", "products", async {
                let updated = sqlx::query_as::<_, Product>(&format!(
                    "UPDATE products \
                     SET name = $2, description = $3, price = $4, discount_price = $5, \
                         category_id = $6, image_url = $7, updated_at = $8 \
                     WHERE id = $1 \
                     RETURNING {PRODUCT_COLUMNS}"
                ))
                .bind(product.id)
                .bind(&product.name)
                .bind(&product.description)
                .bind(product.price)
                .bind(product.discount_price)
                .bind(product.category_id)
                .bind(&product.image_url)
                .bind(product.updated_at)
                .fetch_one(&self.pool)
                .await?;

                info!("Product updated");
                Ok(updated)
            })
            .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        self.tracer
            .trace_operation("delete", "products", async {
                sqlx::query("DELETE FROM products WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                info!("Product deleted");
                Ok(())
            })
            .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        self.tracer
            .trace_operation("exists", "products", async {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM products WHERE id = $1)")
                        .bind(id)
                        .fetch_one(&self.pool)
                        .await?;

                info!("Product exists: {}", exists);
                Ok(exists)
            })
            .await
    }
}

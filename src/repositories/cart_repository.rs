use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{Cart, CartItem, NewCartItem, RepositoryResult};
use crate::observability::{DatabaseTracingMiddleware, Metrics};

/// Trait defining the interface for cart data access operations
#[async_trait]
pub trait CartRepository: Send + Sync {
    /// Find a cart by id
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Cart>>;

    /// Find the cart owned by a user, if any
    async fn find_by_user(&self, user_id: i64) -> RepositoryResult<Option<Cart>>;

    /// Create a new cart for a user
    async fn create(&self, user_id: i64) -> RepositoryResult<Cart>;

    /// Check whether a cart exists
    async fn exists(&self, id: i64) -> RepositoryResult<bool>;
}

/// Trait defining the interface for cart item data access operations
#[async_trait]
pub trait CartItemRepository: Send + Sync {
    /// List a cart's items in insertion order
    async fn find_by_cart(&self, cart_id: i64) -> RepositoryResult<Vec<CartItem>>;

    /// Insert a new cart item and return the stored row
    async fn create(&self, item: &NewCartItem) -> RepositoryResult<CartItem>;

    /// Delete a cart item by id
    async fn delete(&self, id: i64) -> RepositoryResult<()>;

    /// Check whether a cart item exists
    async fn exists(&self, id: i64) -> RepositoryResult<bool>;
}

/// PostgreSQL implementation of the CartRepository trait
pub struct PgCartRepository {
    pool: PgPool,
    tracer: DatabaseTracingMiddleware,
}

impl PgCartRepository {
    pub fn new(pool: PgPool, metrics: Arc<Metrics>) -> Self {
        Self {
            pool,
            tracer: DatabaseTracingMiddleware::new(metrics),
        }
    }
}

#[async_trait]
impl CartRepository for PgCartRepository {
    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Cart>> {
        self.tracer
            .trace_operation("find_by_id", "carts", async {
                let cart = sqlx::query_as::<_, Cart>(
                    "SELECT id, user_id, created_at, updated_at FROM carts WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

                info!("Cart lookup by id: found={}", cart.is_some());
                Ok(cart)
            })
            .await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn find_by_user(&self, user_id: i64) -> RepositoryResult<Option<Cart>> {
        self.tracer
            .trace_operation("find_by_user", "carts", async {
                let cart = sqlx::query_as::<_, Cart>(
                    "SELECT id, user_id, created_at, updated_at FROM carts WHERE user_id = $1",
                )
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

                info!("Cart lookup by user: found={}", cart.is_some());
                Ok(cart)
            })
            .await
    }

    #[instrument(skip(self), fields(user_id = %user_id))]
    async fn create(&self, user_id: i64) -> RepositoryResult<Cart> {
        self.tracer
            .trace_operation("create", "carts", async {
                // One cart per user, enforced by the unique constraint on user_id
                let cart = sqlx::query_as::<_, Cart>(
                    "INSERT INTO carts (user_id) VALUES ($1) \
                     RETURNING id, user_id, created_at, updated_at",
                )
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;

                info!("Cart created with id {}", cart.id);
                Ok(cart)
            })
            .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        self.tracer
            .trace_operation("exists", "carts", async {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM carts WHERE id = $1)")
                        .bind(id)
                        .fetch_one(&self.pool)
                        .await?;

                info!("Cart exists: {}", exists);
                Ok(exists)
            })
            .await
    }
}

/// PostgreSQL implementation of the CartItemRepository trait
pub struct PgCartItemRepository {
    pool: PgPool,
    tracer: DatabaseTracingMiddleware,
}

impl PgCartItemRepository {
    pub fn new(pool: PgPool, metrics: Arc<Metrics>) -> Self {
        Self {
            pool,
            tracer: DatabaseTracingMiddleware::new(metrics),
        }
    }
}

#[async_trait]
impl CartItemRepository for PgCartItemRepository {
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    async fn find_by_cart(&self, cart_id: i64) -> RepositoryResult<Vec<CartItem>> {
        self.tracer
            .trace_operation("find_by_cart", "cart_items", async {
                let items = sqlx::query_as::<_, CartItem>(
                    "SELECT id, cart_id, product_id, quantity, added_at \
                     FROM cart_items WHERE cart_id = $1 ORDER BY id",
                )
                .bind(cart_id)
                .fetch_all(&self.pool)
                .await?;

                info!("Found {} cart items", items.len());
                Ok(items)
            })
            .await
    }

    #[instrument(skip(self, item), fields(cart_id = %item.cart_id, product_id = %item.product_id))]
    async fn create(&self, item: &NewCartItem) -> RepositoryResult<CartItem> {
        self.tracer
            .trace_operation("create", "cart_items", async {
                let created = sqlx::query_as::<_, CartItem>(
                    "INSERT INTO cart_items (cart_id, product_id, quantity) \
                     VALUES ($1, $2, $3) \
                     RETURNING id, cart_id, product_id, quantity, added_at",
                )
                .bind(item.cart_id)
                .bind(item.product_id)
                .bind(item.quantity)
                .fetch_one(&self.pool)
                .await?;

                info!("Cart item created with id {}", created.id);
                Ok(created)
            })
            .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn delete(&self, id: i64) -> RepositoryResult<()> {
        self.tracer
            .trace_operation("delete", "cart_items", async {
                sqlx::query("DELETE FROM cart_items WHERE id = $1")
                    .bind(id)
                    .execute(&self.pool)
                    .await?;

                info!("Cart item deleted");
                Ok(())
            })
            .await
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn exists(&self, id: i64) -> RepositoryResult<bool> {
        self.tracer
            .trace_operation("exists", "cart_items", async {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM cart_items WHERE id = $1)")
                        .bind(id)
                        .fetch_one(&self.pool)
                        .await?;

                info!("Cart item exists: {}", exists);
                Ok(exists)
            })
            .await
    }
}

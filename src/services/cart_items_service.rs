use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{CartItem, ServiceError, ServiceResult};
use crate::observability::{BusinessTracingMiddleware, Metrics};
use crate::repositories::{CartItemRepository, CartRepository};

/// Service for reading and removing the items of a cart
pub struct CartItemsService {
    repository: Arc<dyn CartItemRepository>,
    cart_repository: Arc<dyn CartRepository>,
    tracer: BusinessTracingMiddleware,
}

impl CartItemsService {
    pub fn new(
        repository: Arc<dyn CartItemRepository>,
        cart_repository: Arc<dyn CartRepository>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            repository,
            cart_repository,
            tracer: BusinessTracingMiddleware::new(metrics),
        }
    }

    /// List a cart's items. Fails with CartNotFound when the cart id does
    /// not resolve.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_list_of_items(&self, cart_id: i64) -> ServiceResult<Vec<CartItem>> {
        self.tracer
            .trace_cart_operation("get_list_of_items", async {
                info!("Fetching list of items from the cart");

                if !self.cart_repository.exists(cart_id).await? {
                    warn!("Cart not found");
                    return Err(ServiceError::CartNotFound { id: cart_id });
                }

                let items = self.repository.find_by_cart(cart_id).await?;

                info!("Found {} items", items.len());
                Ok(items)
            })
            .await
    }

    /// Delete a cart item by id. Not idempotent: a second call on the same
    /// id fails with CartItemNotFound.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_item_by_id(&self, id: i64) -> ServiceResult<()> {
        self.tracer
            .trace_cart_operation("delete_item_by_id", async {
                info!("Deleting cart item");

                if !self.repository.exists(id).await? {
                    warn!("Cart item not deleted: {}", id);
                    return Err(ServiceError::CartItemNotFound { id });
                }

                self.repository.delete(id).await?;

                info!("Cart item deleted");
                Ok(())
            })
            .await
    }
}

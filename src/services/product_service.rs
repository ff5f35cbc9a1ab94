use std::sync::Arc;
use tracing::{info, instrument, warn};

use crate::models::{
    CartItem, CreateProductRequest, EditProductRequest, NewCartItem, Product, ProductFilters,
    ProductListResponse, ServiceError, ServiceResult, Validate,
};
use crate::observability::{BusinessTracingMiddleware, Metrics};
use crate::repositories::{
    CartItemRepository, CartRepository, ProductRepository, UserRepository,
};

/// Service for managing catalog products and placing them into carts
pub struct ProductService {
    repository: Arc<dyn ProductRepository>,
    cart_repository: Arc<dyn CartRepository>,
    cart_item_repository: Arc<dyn CartItemRepository>,
    user_repository: Arc<dyn UserRepository>,
    tracer: BusinessTracingMiddleware,
}

impl ProductService {
    pub fn new(
        repository: Arc<dyn ProductRepository>,
        cart_repository: Arc<dyn CartRepository>,
        cart_item_repository: Arc<dyn CartItemRepository>,
        user_repository: Arc<dyn UserRepository>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            repository,
            cart_repository,
            cart_item_repository,
            user_repository,
            tracer: BusinessTracingMiddleware::new(metrics),
        }
    }

    /// Create a new product
    #[instrument(skip(self, request), fields(name = %request.name))]
    pub async fn create_product(&self, request: CreateProductRequest) -> ServiceResult<Product> {
        self.tracer
            .trace_product_operation("create_product", async {
                info!("Creating product");

                request.validate()?;

                let created = self.repository.create(&request).await?;

                info!("Product created with id {}", created.id);
                Ok(created)
            })
            .await
    }

    /// List products matching the given filters, in the requested order.
    /// Absent filters apply no restriction.
    #[instrument(skip(self), fields(filters = ?filters))]
    pub async fn get_filtered_products(
        &self,
        filters: ProductFilters,
    ) -> ServiceResult<ProductListResponse> {
        self.tracer
            .trace_product_operation("get_filtered_products", async {
                info!("Fetching filtered products");

                let products = self.repository.find_filtered(&filters).await?;

                // Repository-level filtering is authoritative; re-check here so an
                // implementation that over-fetches cannot widen the result set.
                let products: Vec<Product> = products
                    .into_iter()
                    .filter(|product| product.matches_filters(&filters))
                    .collect();

                let total_count = products.len();
                info!("Found {} filtered products", total_count);

                Ok(ProductListResponse {
                    products,
                    total_count,
                })
            })
            .await
    }

    /// Edit an existing product, overwriting name, description, price,
    /// category and image URL, and stamping the update time
    #[instrument(skip(self, request), fields(id = %id))]
    pub async fn edit_product(
        &self,
        id: i64,
        request: EditProductRequest,
    ) -> ServiceResult<Product> {
        self.tracer
            .trace_product_operation("edit_product", async {
                info!("Editing product");

                request.validate()?;

                let mut product = match self.repository.find_by_id(id).await? {
                    Some(product) => product,
                    None => {
                        warn!("Product not found");
                        return Err(ServiceError::ProductNotFound { id });
                    }
                };

                product.apply_edit(request);
                let updated = self.repository.update(&product).await?;

                info!("Product updated");
                Ok(updated)
            })
            .await
    }

    /// Fetch a product by id
    #[instrument(skip(self), fields(id = %id))]
    pub async fn find_product_by_id(&self, id: i64) -> ServiceResult<Product> {
        self.tracer
            .trace_product_operation("find_product_by_id", async {
                info!("Fetching product");

                match self.repository.find_by_id(id).await? {
                    Some(product) => {
                        info!("Found product: {}", product.name);
                        Ok(product)
                    }
                    None => {
                        warn!("Product not found");
                        Err(ServiceError::ProductNotFound { id })
                    }
                }
            })
            .await
    }

    /// Delete a product by id. Not idempotent: deleting an absent id fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn delete_product(&self, id: i64) -> ServiceResult<()> {
        self.tracer
            .trace_product_operation("delete_product", async {
                info!("Deleting product");

                if !self.repository.exists(id).await? {
                    warn!("Product not deleted: {}", id);
                    return Err(ServiceError::ProductNotFound { id });
                }

                self.repository.delete(id).await?;

                info!("Product deleted");
                Ok(())
            })
            .await
    }

    /// Add a product to a user's cart, lazily creating the cart on first
    /// use. The persisted cart item is returned; the cart's item collection
    /// is always read back from storage rather than tracked in memory.
    #[instrument(skip(self, product), fields(product_id = %product.id, user_id = %user_id, quantity = %quantity))]
    pub async fn add_product_to_cart(
        &self,
        product: Product,
        quantity: i32,
        user_id: i64,
    ) -> ServiceResult<CartItem> {
        self.tracer
            .trace_cart_operation("add_product_to_cart", async {
                info!("Adding product to user's cart");

                product.validate()?;
                crate::models::validate_cart_quantity(quantity)?;

                if self.user_repository.find_by_id(user_id).await?.is_none() {
                    warn!("User not found");
                    return Err(ServiceError::UserNotFound { id: user_id });
                }

                let cart = match self.cart_repository.find_by_user(user_id).await? {
                    Some(cart) => cart,
                    None => {
                        info!("No cart for user, creating one");
                        self.cart_repository.create(user_id).await?
                    }
                };

                let item = self
                    .cart_item_repository
                    .create(&NewCartItem {
                        cart_id: cart.id,
                        product_id: product.id,
                        quantity,
                    })
                    .await?;

                info!("Product {} added to cart {}", item.product_id, item.cart_id);
                Ok(item)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Cart, NewCartItem, ProductSort, RepositoryError, User};
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::eq;
    use rust_decimal_macros::dec;

    mock! {
        TestProductRepository {}

        #[async_trait]
        impl ProductRepository for TestProductRepository {
            async fn find_by_id(&self, id: i64) -> Result<Option<Product>, RepositoryError>;
            async fn find_filtered(&self, filters: &ProductFilters) -> Result<Vec<Product>, RepositoryError>;
            async fn create(&self, request: &CreateProductRequest) -> Result<Product, RepositoryError>;
            async fn update(&self, product: &Product) -> Result<Product, RepositoryError>;
            async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
            async fn exists(&self, id: i64) -> Result<bool, RepositoryError>;
        }
    }

    mock! {
        TestCartRepository {}

        #[async_trait]
        impl CartRepository for TestCartRepository {
            async fn find_by_id(&self, id: i64) -> Result<Option<Cart>, RepositoryError>;
            async fn find_by_user(&self, user_id: i64) -> Result<Option<Cart>, RepositoryError>;
            async fn create(&self, user_id: i64) -> Result<Cart, RepositoryError>;
            async fn exists(&self, id: i64) -> Result<bool, RepositoryError>;
        }
    }

    mock! {
        TestCartItemRepository {}

        #[async_trait]
        impl CartItemRepository for TestCartItemRepository {
            async fn find_by_cart(&self, cart_id: i64) -> Result<Vec<CartItem>, RepositoryError>;
            async fn create(&self, item: &NewCartItem) -> Result<CartItem, RepositoryError>;
            async fn delete(&self, id: i64) -> Result<(), RepositoryError>;
            async fn exists(&self, id: i64) -> Result<bool, RepositoryError>;
        }
    }

    mock! {
        TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError>;
        }
    }

    fn test_product(id: i64) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: "Garden Trowel".to_string(),
            description: "Stainless steel hand trowel".to_string(),
            price: dec!(12.99),
            discount_price: None,
            category_id: 3,
            image_url: Some("trowel.jpg".to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn test_user(id: i64) -> User {
        User {
            id,
            name: "Alex".to_string(),
            email: "alex@example.com".to_string(),
            created_at: Utc::now(),
        }
    }

    fn test_cart(id: i64, user_id: i64) -> Cart {
        let now = Utc::now();
        Cart {
            id,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    fn test_create_request() -> CreateProductRequest {
        CreateProductRequest {
            name: "Garden Trowel".to_string(),
            description: "Stainless steel hand trowel".to_string(),
            price: dec!(12.99),
            discount_price: None,
            category_id: 3,
            image_url: Some("trowel.jpg".to_string()),
        }
    }

    fn service_with(
        product_repo: MockTestProductRepository,
        cart_repo: MockTestCartRepository,
        item_repo: MockTestCartItemRepository,
        user_repo: MockTestUserRepository,
    ) -> ProductService {
        ProductService::new(
            Arc::new(product_repo),
            Arc::new(cart_repo),
            Arc::new(item_repo),
            Arc::new(user_repo),
            Arc::new(Metrics::new().unwrap()),
        )
    }

    #[tokio::test]
    async fn test_create_product_success() {
        let mut product_repo = MockTestProductRepository::new();
        product_repo
            .expect_create()
            .times(1)
            .returning(|_| Ok(test_product(1)));

        let service = service_with(
            product_repo,
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        let result = service.create_product(test_create_request()).await;

        assert!(result.is_ok());
        let product = result.unwrap();
        assert_eq!(product.id, 1);
        assert_eq!(product.name, "Garden Trowel");
    }

    #[tokio::test]
    async fn test_create_product_validation_error() {
        // Repository must not be touched when validation fails
        let service = service_with(
            MockTestProductRepository::new(),
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        let mut request = test_create_request();
        request.name = "".to_string();

        let result = service.create_product(request).await;

        assert!(result.is_err());
        match result.unwrap_err() {
            ServiceError::Validation { message } => {
                assert!(message.contains("product_name"));
            }
            _ => panic!("Expected Validation error"),
        }
    }

    #[tokio::test]
    async fn test_get_filtered_products_no_filters() {
        let mut product_repo = MockTestProductRepository::new();
        let products = vec![test_product(1), test_product(2)];
        product_repo
            .expect_find_filtered()
            .times(1)
            .returning(move |_| Ok(products.clone()));

        let service = service_with(
            product_repo,
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        let result = service
            .get_filtered_products(ProductFilters::default())
            .await;

        assert!(result.is_ok());
        let response = result.unwrap();
        assert_eq!(response.total_count, 2);
        assert_eq!(response.products.len(), 2);
    }

    #[tokio::test]
    async fn test_get_filtered_products_narrows_result() {
        let mut product_repo = MockTestProductRepository::new();
        let mut discounted = test_product(2);
        discounted.discount_price = Some(dec!(9.99));
        let products = vec![test_product(1), discounted];
        // The repository over-fetches; the service re-applies filters
        product_repo
            .expect_find_filtered()
            .times(1)
            .returning(move |_| Ok(products.clone()));

        let service = service_with(
            product_repo,
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        let filters = ProductFilters {
            discount: Some(true),
            sort: Some(ProductSort::PriceAsc),
            ..Default::default()
        };
        let result = service.get_filtered_products(filters).await;

        assert!(result.is_ok());
        let response = result.unwrap();
        assert_eq!(response.total_count, 1);
        assert_eq!(response.products[0].id, 2);
    }

    #[tokio::test]
    async fn test_edit_product_success() {
        let mut product_repo = MockTestProductRepository::new();
        let existing = test_product(1);
        let original_created_at = existing.created_at;

        product_repo
            .expect_find_by_id()
            .with(eq(1))
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        product_repo
            .expect_update()
            .times(1)
            .returning(|product| Ok(product.clone()));

        let service = service_with(
            product_repo,
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        let request = EditProductRequest {
            name: "Premium Trowel".to_string(),
            description: "Ergonomic stainless steel hand trowel".to_string(),
            price: dec!(15.99),
            category_id: 4,
            image_url: None,
        };

        let result = service.edit_product(1, request).await;

        assert!(result.is_ok());
        let updated = result.unwrap();
        assert_eq!(updated.name, "Premium Trowel");
        assert_eq!(updated.price, dec!(15.99));
        assert_eq!(updated.category_id, 4);
        assert_eq!(updated.image_url, None);
        assert_eq!(updated.id, 1);
        assert_eq!(updated.created_at, original_created_at);
        assert!(updated.updated_at >= original_created_at);
    }

    #[tokio::test]
    async fn test_edit_product_not_found() {
        let mut product_repo = MockTestProductRepository::new();
        product_repo
            .expect_find_by_id()
            .with(eq(99))
            .times(1)
            .returning(|_| Ok(None));

        let service = service_with(
            product_repo,
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        let request = EditProductRequest {
            name: "Premium Trowel".to_string(),
            description: "Ergonomic stainless steel hand trowel".to_string(),
            price: dec!(15.99),
            category_id: 4,
            image_url: None,
        };

        let result = service.edit_product(99, request).await;

        assert!(matches!(
            result.unwrap_err(),
            ServiceError::ProductNotFound { id: 99 }
        ));
    }

    #[tokio::test]
    async fn test_edit_product_validation_error_skips_lookup() {
        let service = service_with(
            MockTestProductRepository::new(),
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        let request = EditProductRequest {
            name: "".to_string(),
            description: "Ergonomic stainless steel hand trowel".to_string(),
            price: dec!(15.99),
            category_id: 4,
            image_url: None,
        };

        let result = service.edit_product(1, request).await;

        assert!(matches!(
            result.unwrap_err(),
            ServiceError::Validation { .. }
        ));
    }

    #[tokio::test]
    async fn test_find_product_by_id() {
        let mut product_repo = MockTestProductRepository::new();
        product_repo
            .expect_find_by_id()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(Some(test_product(1))));
        product_repo
            .expect_find_by_id()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(None));

        let service = service_with(
            product_repo,
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        assert_eq!(service.find_product_by_id(1).await.unwrap().id, 1);
        assert!(matches!(
            service.find_product_by_id(42).await.unwrap_err(),
            ServiceError::ProductNotFound { id: 42 }
        ));
    }

    #[tokio::test]
    async fn test_delete_product_success() {
        let mut product_repo = MockTestProductRepository::new();
        product_repo
            .expect_exists()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(true));
        product_repo
            .expect_delete()
            .with(eq(1))
            .times(1)
            .returning(|_| Ok(()));

        let service = service_with(
            product_repo,
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        assert!(service.delete_product(1).await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_product_not_found() {
        let mut product_repo = MockTestProductRepository::new();
        product_repo
            .expect_exists()
            .with(eq(42))
            .times(1)
            .returning(|_| Ok(false));
        // delete must not be called
        product_repo.expect_delete().times(0);

        let service = service_with(
            product_repo,
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        assert!(matches!(
            service.delete_product(42).await.unwrap_err(),
            ServiceError::ProductNotFound { id: 42 }
        ));
    }

    #[tokio::test]
    async fn test_add_product_to_cart_creates_cart_lazily() {
        let mut cart_repo = MockTestCartRepository::new();
        let mut item_repo = MockTestCartItemRepository::new();
        let mut user_repo = MockTestUserRepository::new();

        user_repo
            .expect_find_by_id()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(Some(test_user(5))));
        cart_repo
            .expect_find_by_user()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(None));
        cart_repo
            .expect_create()
            .with(eq(5))
            .times(1)
            .returning(|user_id| Ok(test_cart(10, user_id)));
        item_repo.expect_create().times(1).returning(|item| {
            Ok(CartItem {
                id: 100,
                cart_id: item.cart_id,
                product_id: item.product_id,
                quantity: item.quantity,
                added_at: Utc::now(),
            })
        });

        let service = service_with(
            MockTestProductRepository::new(),
            cart_repo,
            item_repo,
            user_repo,
        );

        let product = test_product(7);
        let result = service.add_product_to_cart(product, 2, 5).await;

        assert!(result.is_ok());
        let item = result.unwrap();
        assert_eq!(item.cart_id, 10);
        assert_eq!(item.product_id, 7);
        assert_eq!(item.quantity, 2);
    }

    #[tokio::test]
    async fn test_add_product_to_cart_uses_existing_cart() {
        let mut cart_repo = MockTestCartRepository::new();
        let mut item_repo = MockTestCartItemRepository::new();
        let mut user_repo = MockTestUserRepository::new();

        user_repo
            .expect_find_by_id()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(Some(test_user(5))));
        cart_repo
            .expect_find_by_user()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(Some(test_cart(10, 5))));
        // No new cart is created for a user who already has one
        cart_repo.expect_create().times(0);
        item_repo.expect_create().times(1).returning(|item| {
            Ok(CartItem {
                id: 101,
                cart_id: item.cart_id,
                product_id: item.product_id,
                quantity: item.quantity,
                added_at: Utc::now(),
            })
        });

        let service = service_with(
            MockTestProductRepository::new(),
            cart_repo,
            item_repo,
            user_repo,
        );

        let result = service.add_product_to_cart(test_product(8), 1, 5).await;

        assert!(result.is_ok());
        let item = result.unwrap();
        assert_eq!(item.cart_id, 10);
        assert_eq!(item.product_id, 8);
    }

    #[tokio::test]
    async fn test_add_product_to_cart_user_not_found() {
        let mut user_repo = MockTestUserRepository::new();
        user_repo
            .expect_find_by_id()
            .with(eq(99))
            .times(1)
            .returning(|_| Ok(None));

        let service = service_with(
            MockTestProductRepository::new(),
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            user_repo,
        );

        let result = service.add_product_to_cart(test_product(7), 2, 99).await;

        assert!(matches!(
            result.unwrap_err(),
            ServiceError::UserNotFound { id: 99 }
        ));
    }

    #[tokio::test]
    async fn test_product_operations_are_counted() {
        let mut product_repo = MockTestProductRepository::new();
        product_repo
            .expect_create()
            .times(1)
            .returning(|_| Ok(test_product(1)));

        let metrics = Arc::new(Metrics::new().unwrap());
        let service = ProductService::new(
            Arc::new(product_repo),
            Arc::new(MockTestCartRepository::new()),
            Arc::new(MockTestCartItemRepository::new()),
            Arc::new(MockTestUserRepository::new()),
            metrics.clone(),
        );

        service.create_product(test_create_request()).await.unwrap();

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("product_operations_total"));
        assert!(encoded.contains("create_product"));
    }

    #[tokio::test]
    async fn test_add_product_to_cart_is_counted() {
        let mut cart_repo = MockTestCartRepository::new();
        let mut item_repo = MockTestCartItemRepository::new();
        let mut user_repo = MockTestUserRepository::new();

        user_repo
            .expect_find_by_id()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(Some(test_user(5))));
        cart_repo
            .expect_find_by_user()
            .with(eq(5))
            .times(1)
            .returning(|_| Ok(Some(test_cart(10, 5))));
        item_repo.expect_create().times(1).returning(|item| {
            Ok(CartItem {
                id: 102,
                cart_id: item.cart_id,
                product_id: item.product_id,
                quantity: item.quantity,
                added_at: Utc::now(),
            })
        });

        let metrics = Arc::new(Metrics::new().unwrap());
        let service = ProductService::new(
            Arc::new(MockTestProductRepository::new()),
            Arc::new(cart_repo),
            Arc::new(item_repo),
            Arc::new(user_repo),
            metrics.clone(),
        );

        service
            .add_product_to_cart(test_product(7), 2, 5)
            .await
            .unwrap();

        let encoded = metrics.encode().unwrap();
        assert!(encoded.contains("cart_operations_total"));
        assert!(encoded.contains("add_product_to_cart"));
    }

    #[tokio::test]
    async fn test_add_product_to_cart_invalid_quantity() {
        let service = service_with(
            MockTestProductRepository::new(),
            MockTestCartRepository::new(),
            MockTestCartItemRepository::new(),
            MockTestUserRepository::new(),
        );

        let result = service.add_product_to_cart(test_product(7), 0, 5).await;

        assert!(matches!(
            result.unwrap_err(),
            ServiceError::Validation { .. }
        ));
    }
}

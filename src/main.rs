use anyhow::Result;
use axum::{middleware, routing::get, Router};
use sqlx::postgres::PgPoolOptions;
use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use gardenshop_rs::{
    handlers::{
        cart, categories, cors_middleware, health_check, metrics_handler, products,
        request_validation_middleware, security_headers_middleware,
    },
    init_observability,
    observability::{observability_middleware, Metrics},
    repositories::{
        PgCartItemRepository, PgCartRepository, PgCategoryRepository, PgProductRepository,
        PgUserRepository,
    },
    services::{CartItemsService, CategoryService, ProductService},
    Config,
};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_environment()?;

    init_observability(
        &config.observability.service_name,
        config.observability.enable_json_logging,
    )?;

    info!("Starting gardenshop-rs service");
    info!(
        "Service: {} v{}",
        config.observability.service_name, config.observability.service_version
    );

    let metrics = Arc::new(Metrics::new()?);
    info!("Metrics initialized successfully");

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.database_url)
        .await?;
    info!("Database pool initialized successfully");

    sqlx::migrate!("./migrations").run(&pool).await?;
    info!("Database migrations applied");

    metrics.set_active_connections(pool.size() as f64);

    let product_repository = Arc::new(PgProductRepository::new(pool.clone(), metrics.clone()));
    let category_repository = Arc::new(PgCategoryRepository::new(pool.clone(), metrics.clone()));
    let cart_repository = Arc::new(PgCartRepository::new(pool.clone(), metrics.clone()));
    let cart_item_repository = Arc::new(PgCartItemRepository::new(pool.clone(), metrics.clone()));
    let user_repository = Arc::new(PgUserRepository::new(pool, metrics.clone()));
    info!("Repositories initialized successfully");

    let product_service = Arc::new(ProductService::new(
        product_repository,
        cart_repository.clone(),
        cart_item_repository.clone(),
        user_repository,
        metrics.clone(),
    ));
    let cart_items_service = Arc::new(CartItemsService::new(
        cart_item_repository,
        cart_repository,
        metrics.clone(),
    ));
    let category_service = Arc::new(CategoryService::new(category_repository));
    info!("Services initialized successfully");

    let app = create_app(metrics, product_service, cart_items_service, category_service);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Server listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install CTRL+C signal handler");
        info!("Shutdown signal received");
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn create_app(
    metrics: Arc<Metrics>,
    product_service: Arc<ProductService>,
    cart_items_service: Arc<CartItemsService>,
    category_service: Arc<CategoryService>,
) -> Router {
    let metrics_for_middleware = metrics.clone();

    Router::new()
        // Health and metrics endpoints
        .route("/health/status", get(health_check))
        .route("/metrics", get(metrics_handler))
        .with_state(metrics)
        // Business endpoints
        .merge(products::create_products_router(product_service))
        .merge(cart::create_cart_router(cart_items_service))
        .merge(categories::create_categories_router(category_service))
        // Middleware layers, outer to inner
        .layer(middleware::from_fn(security_headers_middleware))
        .layer(middleware::from_fn(cors_middleware))
        .layer(middleware::from_fn(request_validation_middleware))
        .layer(middleware::from_fn(move |req, next| {
            observability_middleware(metrics_for_middleware.clone(), req, next)
        }))
}

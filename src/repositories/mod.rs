// Repository traits and their PostgreSQL implementations

pub mod cart_repository;
pub mod category_repository;
pub mod product_repository;
pub mod user_repository;

pub use cart_repository::{
    CartItemRepository, CartRepository, PgCartItemRepository, PgCartRepository,
};
pub use category_repository::{CategoryRepository, PgCategoryRepository};
pub use product_repository::{PgProductRepository, ProductRepository};
pub use user_repository::{PgUserRepository, UserRepository};

// Services module - business logic layer

pub mod cart_items_service;
pub mod category_service;
pub mod product_service;

pub use cart_items_service::CartItemsService;
pub use category_service::CategoryService;
pub use product_service::ProductService;

// Re-export all model types
pub use self::cart::*;
pub use self::category::*;
pub use self::enums::*;
pub use self::errors::*;
pub use self::product::*;
pub use self::user::*;
pub use self::validation::*;

mod cart;
mod category;
mod enums;
mod errors;
mod product;
mod user;
mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sort keys accepted by the filtered product listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSort {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    Newest,
}

impl fmt::Display for ProductSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductSort::PriceAsc => write!(f, "price_asc"),
            ProductSort::PriceDesc => write!(f, "price_desc"),
            ProductSort::NameAsc => write!(f, "name_asc"),
            ProductSort::NameDesc => write!(f, "name_desc"),
            ProductSort::Newest => write!(f, "newest"),
        }
    }
}

impl FromStr for ProductSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "price_asc" => Ok(ProductSort::PriceAsc),
            "price_desc" => Ok(ProductSort::PriceDesc),
            "name_asc" => Ok(ProductSort::NameAsc),
            "name_desc" => Ok(ProductSort::NameDesc),
            "newest" => Ok(ProductSort::Newest),
            _ => Err(format!("Invalid sort key: {}", s)),
        }
    }
}

impl ProductSort {
    /// The ORDER BY clause fragment for this sort key
    pub fn order_by_clause(&self) -> &'static str {
        match self {
            ProductSort::PriceAsc => "price ASC, id ASC",
            ProductSort::PriceDesc => "price DESC, id ASC",
            ProductSort::NameAsc => "name ASC, id ASC",
            ProductSort::NameDesc => "name DESC, id ASC",
            ProductSort::Newest => "created_at DESC, id DESC",
        }
    }
}

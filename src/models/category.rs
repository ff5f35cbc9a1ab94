use serde::{Deserialize, Serialize};

/// Product category; products reference a category by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

/// Request model for creating a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    pub name: String,
}

/// Request model for renaming a category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditCategoryRequest {
    pub name: String,
}

/// Response model for the category listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryListResponse {
    pub categories: Vec<Category>,
    pub total_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let category = Category {
            id: 5,
            name: "Planting Tools".to_string(),
        };

        let json = serde_json::to_string(&category).unwrap();
        let deserialized: Category = serde_json::from_str(&json).unwrap();

        assert_eq!(category, deserialized);
    }

    #[test]
    fn test_request_deserialization() {
        let request: CreateCategoryRequest =
            serde_json::from_str(r#"{"name": "Fertilizers"}"#).unwrap();
        assert_eq!(request.name, "Fertilizers");
    }
}

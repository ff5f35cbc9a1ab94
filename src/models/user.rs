use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Store user; each user owns at most one cart, enforced by the unique
/// user reference on the carts table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_roundtrip() {
        let user = User {
            id: 1,
            name: "Alex".to_string(),
            email: "alex@example.com".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&user).unwrap();
        let deserialized: User = serde_json::from_str(&json).unwrap();

        assert_eq!(user, deserialized);
    }
}

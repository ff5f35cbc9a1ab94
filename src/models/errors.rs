use thiserror::Error;

/// Service-level errors that can occur in business logic
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Product not found with id: {id}")]
    ProductNotFound { id: i64 },

    #[error("Category not found with id: {id}")]
    CategoryNotFound { id: i64 },

    #[error("Cart not found with id: {id}")]
    CartNotFound { id: i64 },

    #[error("Cart item not found with id: {id}")]
    CartItemNotFound { id: i64 },

    #[error("User not found with id: {id}")]
    UserNotFound { id: i64 },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Repository error: {source}")]
    Repository {
        #[from]
        source: RepositoryError,
    },
}

/// Repository-level errors for data access operations
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database connection failed")]
    ConnectionFailed,

    #[error("Row not found")]
    NotFound,

    #[error("Constraint violation: {message}")]
    ConstraintViolation { message: String },

    #[error("Invalid query parameters: {message}")]
    InvalidQuery { message: String },

    #[error("Timeout occurred during operation")]
    Timeout,

    #[error("Database error: {message}")]
    Database { message: String },
}

impl From<sqlx::Error> for RepositoryError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => RepositoryError::NotFound,
            sqlx::Error::PoolTimedOut => RepositoryError::Timeout,
            sqlx::Error::Io(_) | sqlx::Error::Tls(_) => RepositoryError::ConnectionFailed,
            sqlx::Error::Database(db_err) => {
                if db_err.is_foreign_key_violation()
                    || db_err.is_unique_violation()
                    || db_err.is_check_violation()
                {
                    RepositoryError::ConstraintViolation {
                        message: db_err.to_string(),
                    }
                } else {
                    RepositoryError::Database {
                        message: db_err.to_string(),
                    }
                }
            }
            other => RepositoryError::Database {
                message: other.to_string(),
            },
        }
    }
}

/// Validation errors for input data
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required field missing: {field}")]
    RequiredField { field: String },

    #[error("Invalid field value: {field}={value}, reason={reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Field too long: {field}, max_length={max_length}, actual_length={actual_length}")]
    TooLong {
        field: String,
        max_length: usize,
        actual_length: usize,
    },

    #[error("Invalid format: {field}, expected={expected}")]
    InvalidFormat { field: String, expected: String },

    #[error("Value out of range: {field}, min={min}, max={max}, value={value}")]
    OutOfRange {
        field: String,
        min: String,
        max: String,
        value: String,
    },
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::Validation {
            message: err.to_string(),
        }
    }
}

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Result type alias for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Result type alias for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = ServiceError::ProductNotFound { id: 42 };
        assert_eq!(error.to_string(), "Product not found with id: 42");

        let error = ServiceError::CartItemNotFound { id: 7 };
        assert_eq!(error.to_string(), "Cart item not found with id: 7");

        let validation_error = ValidationError::RequiredField {
            field: "product_name".to_string(),
        };
        assert_eq!(
            validation_error.to_string(),
            "Required field missing: product_name"
        );
    }

    #[test]
    fn test_error_conversion() {
        let validation_error = ValidationError::InvalidValue {
            field: "price".to_string(),
            value: "-10".to_string(),
            reason: "Price cannot be negative".to_string(),
        };

        let service_error: ServiceError = validation_error.into();
        match service_error {
            ServiceError::Validation { message } => {
                assert!(message.contains("Invalid field value"));
            }
            _ => panic!("Expected Validation conversion"),
        }
    }

    #[test]
    fn test_repository_error_from_sqlx() {
        let repo_error: RepositoryError = sqlx::Error::RowNotFound.into();
        match repo_error {
            RepositoryError::NotFound => {}
            _ => panic!("Expected NotFound error"),
        }

        let repo_error: RepositoryError = sqlx::Error::PoolTimedOut.into();
        match repo_error {
            RepositoryError::Timeout => {}
            _ => panic!("Expected Timeout error"),
        }
    }
}

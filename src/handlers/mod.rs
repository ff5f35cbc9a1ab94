pub mod cart;
pub mod categories;
pub mod health;
pub mod metrics;
pub mod middleware;
pub mod products;

pub use cart::*;
pub use categories::*;
pub use health::*;
pub use metrics::*;
pub use middleware::*;
pub use products::*;

use axum::{http::StatusCode, response::Json};
use serde_json::{json, Value};

use crate::models::{RepositoryError, ServiceError};

/// Convert ServiceError to HTTP response
pub(crate) fn service_error_to_response(err: ServiceError) -> (StatusCode, Json<Value>) {
    let (status, message) = match &err {
        ServiceError::ProductNotFound { .. }
        | ServiceError::CategoryNotFound { .. }
        | ServiceError::CartNotFound { .. }
        | ServiceError::CartItemNotFound { .. }
        | ServiceError::UserNotFound { .. } => (StatusCode::NOT_FOUND, err.to_string()),
        ServiceError::Validation { .. } => (StatusCode::BAD_REQUEST, err.to_string()),
        ServiceError::Repository { source } => match source {
            RepositoryError::NotFound => (StatusCode::NOT_FOUND, "Resource not found".to_string()),
            RepositoryError::ConstraintViolation { .. } => {
                (StatusCode::CONFLICT, "Constraint violation".to_string())
            }
            RepositoryError::ConnectionFailed => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Database connection failed".to_string(),
            ),
            RepositoryError::Timeout => {
                (StatusCode::REQUEST_TIMEOUT, "Request timeout".to_string())
            }
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        },
    };

    (
        status,
        Json(json!({
            "error": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    )
}

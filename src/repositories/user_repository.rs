use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::models::{RepositoryResult, User};
use crate::observability::{DatabaseTracingMiddleware, Metrics};

/// Trait defining the interface for user lookups
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by id
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>>;
}

/// PostgreSQL implementation of the UserRepository trait
pub struct PgUserRepository {
    pool: PgPool,
    tracer: DatabaseTracingMiddleware,
}

impl PgUserRepository {
    pub fn new(pool: PgPool, metrics: Arc<Metrics>) -> Self {
        Self {
            pool,
            tracer: DatabaseTracingMiddleware::new(metrics),
        }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self), fields(id = %id))]
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        self.tracer
            .trace_operation("find_by_id", "users", async {
                let user = sqlx::query_as::<_, User>(
                    "SELECT id, name, email, created_at FROM users WHERE id = $1",
                )
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

                info!("User lookup by id: found={}", user.is_some());
                Ok(user)
            })
            .await
    }
}

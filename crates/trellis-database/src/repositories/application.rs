//! Application repository implementation.

use sqlx::PgPool;

use trellis_core::error::{AppError, ErrorKind};
use trellis_core::result::AppResult;
use trellis_entity::application::Application;

/// Repository for application lookups.
#[derive(Debug, Clone)]
pub struct ApplicationRepository {
    pool: PgPool,
}

impl ApplicationRepository {
    /// Create a new application repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a application by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Application>> {
        sqlx::query_as::<_, Application>("SELECT * FROM applications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find application", e))
    }
}

//! Cluster repository implementation.

use sqlx::PgPool;

use trellis_core::error::{AppError, ErrorKind};
use trellis_core::result::AppResult;
use trellis_entity::cluster::Cluster;

/// Repository for cluster lookups.
#[derive(Debug, Clone)]
pub struct ClusterRepository {
    pool: PgPool,
}

impl ClusterRepository {
    /// Create a new cluster repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a cluster by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Cluster>> {
        sqlx::query_as::<_, Cluster>("SELECT * FROM clusters WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find cluster", e))
    }
}

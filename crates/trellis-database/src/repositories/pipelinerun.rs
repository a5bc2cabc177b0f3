//! Pipeline run repository implementation.

use sqlx::PgPool;

use trellis_core::error::{AppError, ErrorKind};
use trellis_core::result::AppResult;
use trellis_entity::pipelinerun::PipelineRun;

/// Repository for pipeline run lookups.
#[derive(Debug, Clone)]
pub struct PipelineRunRepository {
    pool: PgPool,
}

impl PipelineRunRepository {
    /// Create a new pipeline run repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a pipeline run by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<PipelineRun>> {
        sqlx::query_as::<_, PipelineRun>("SELECT * FROM pipelineruns WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find pipeline run", e))
    }
}

//! Template and template release repository implementations.

use sqlx::PgPool;

use trellis_core::error::{AppError, ErrorKind};
use trellis_core::result::AppResult;
use trellis_entity::template::{Template, TemplateRelease};

/// Repository for template and release lookups.
#[derive(Debug, Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    /// Create a new template repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a template by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Template>> {
        sqlx::query_as::<_, Template>("SELECT * FROM templates WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find template", e))
    }

    /// Find a template release by ID.
    pub async fn find_release_by_id(&self, id: i64) -> AppResult<Option<TemplateRelease>> {
        sqlx::query_as::<_, TemplateRelease>("SELECT * FROM template_releases WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find template release", e)
            })
    }
}

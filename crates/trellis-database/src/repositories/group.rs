//! Group repository implementation.

use sqlx::PgPool;

use trellis_core::error::{AppError, ErrorKind};
use trellis_core::result::AppResult;
use trellis_entity::group::Group;

/// Repository for group lookups.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: PgPool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a group by ID.
    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<Group>> {
        sqlx::query_as::<_, Group>(
            "SELECT id, name, path, parent_id, traversal_ids FROM groups WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find group", e))
    }
}

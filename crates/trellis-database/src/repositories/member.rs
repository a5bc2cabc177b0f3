//! Member (role binding) repository implementation.

use sqlx::PgPool;

use trellis_core::error::{AppError, ErrorKind};
use trellis_core::result::AppResult;
use trellis_entity::member::{Member, MemberType};
use trellis_entity::resource::ResourceType;

/// Repository for role binding lookups. Soft-deleted rows are never returned.
#[derive(Debug, Clone)]
pub struct MemberRepository {
    pool: PgPool,
}

impl MemberRepository {
    /// Create a new member repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find the live binding of one member on one resource.
    pub async fn find_one(
        &self,
        resource_type: ResourceType,
        resource_id: i64,
        member_type: MemberType,
        membername_id: i64,
    ) -> AppResult<Option<Member>> {
        sqlx::query_as::<_, Member>(
            "SELECT * FROM members \
             WHERE resource_type = $1 AND resource_id = $2 \
             AND member_type = $3 AND membername_id = $4 AND deleted_ts = 0 \
             LIMIT 1",
        )
        .bind(resource_type)
        .bind(resource_id)
        .bind(member_type)
        .bind(membername_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find member", e))
    }

    /// Distinct role names referenced by live bindings.
    pub async fn distinct_roles(&self) -> AppResult<Vec<String>> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT role FROM members WHERE deleted_ts = 0 ORDER BY role ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list bound roles", e))
    }
}

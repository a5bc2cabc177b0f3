//! Application entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An application owned by a group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Application {
    /// Unique application identifier.
    pub id: i64,
    /// Owning group.
    pub group_id: i64,
    /// Application name.
    pub name: String,
}

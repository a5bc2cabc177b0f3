//! Cluster entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A deployed instance of an application in one environment/region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Cluster {
    /// Unique cluster identifier.
    pub id: i64,
    /// Owning application.
    pub application_id: i64,
    /// Cluster name.
    pub name: String,
}

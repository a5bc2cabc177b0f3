//! Pipeline run entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A build/deploy pipeline execution against a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct PipelineRun {
    /// Unique pipeline run identifier.
    pub id: i64,
    /// The cluster the run targets.
    pub cluster_id: i64,
    /// Pipeline action (`builddeploy`, `deploy`, `rollback`, ...).
    pub action: String,
}

//! Template entity models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A deployment template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Template {
    /// Unique template identifier.
    pub id: i64,
    /// Owning group, or `0` for templates shared across the whole platform.
    pub group_id: i64,
    /// Template name.
    pub name: String,
}

/// A released version of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TemplateRelease {
    /// Unique release identifier.
    pub id: i64,
    /// The template this release belongs to.
    pub template_id: i64,
    /// Release name (usually a version tag).
    pub name: String,
}

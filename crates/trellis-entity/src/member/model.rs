//! Member (role binding) entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;

use crate::resource::{ResourceRef, ResourceType};

/// Who a binding grants a role to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "member_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MemberType {
    /// A single user, identified by user ID.
    User,
    /// A user group, identified by user-group ID.
    Group,
}

impl MemberType {
    /// Return the member type as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
        }
    }
}

impl fmt::Display for MemberType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A role bound to a member on one resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Member {
    /// Unique binding identifier.
    pub id: i64,
    /// Kind of the bound resource.
    pub resource_type: ResourceType,
    /// ID of the bound resource.
    pub resource_id: i64,
    /// Whether `membername_id` is a user or a user group.
    pub member_type: MemberType,
    /// User ID or user-group ID.
    pub membername_id: i64,
    /// Bound role name.
    pub role: String,
    /// User who granted the role.
    pub granted_by: i64,
    /// When the binding was created.
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    /// When the binding was last changed (the grant time).
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
    /// Soft-delete timestamp in unix seconds; `0` while live.
    #[serde(default)]
    pub deleted_ts: i64,
}

impl Member {
    /// The resource this binding is attached to.
    pub fn resource(&self) -> ResourceRef {
        ResourceRef::new(self.resource_type, self.resource_id)
    }

    /// Whether the binding has not been soft-deleted.
    pub fn is_live(&self) -> bool {
        self.deleted_ts == 0
    }
}

//! Nearest-wins role binding resolution.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use trellis_core::result::AppResult;
use trellis_database::MemberStore;
use trellis_entity::member::MemberType;
use trellis_entity::{ResourceRef, UserIdentity};

use crate::rbac::ADMIN_ROLE;

use super::hierarchy::HierarchyResolver;

/// Where an effective role came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum RoleSource {
    /// The caller is a platform administrator.
    Admin,
    /// A binding on `resource`, `distance` steps above the target.
    Binding {
        resource: ResourceRef,
        distance: usize,
    },
    /// No binding applies; the configured default role.
    Default,
}

/// The effective role of a user on a resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedRole {
    pub role: String,
    pub source: RoleSource,
}

/// Resolves a user's effective role by probing the ancestor chain.
#[derive(Clone)]
pub struct MemberResolver {
    hierarchy: HierarchyResolver,
    members: Arc<dyn MemberStore>,
    default_role: String,
}

impl std::fmt::Debug for MemberResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemberResolver")
            .field("default_role", &self.default_role)
            .finish()
    }
}

impl MemberResolver {
    /// Creates a resolver falling back to `default_role`.
    pub fn new(
        hierarchy: HierarchyResolver,
        members: Arc<dyn MemberStore>,
        default_role: impl Into<String>,
    ) -> Self {
        Self {
            hierarchy,
            members,
            default_role: default_role.into(),
        }
    }

    /// Resolve the role of `user` on `resource`.
    ///
    /// Administrators get the synthetic admin role without any lookup. With
    /// no target resource, or no binding anywhere in its chain, the default
    /// role applies. The first binding found walking upwards wins.
    pub async fn resolve(
        &self,
        user: &UserIdentity,
        resource: Option<ResourceRef>,
    ) -> AppResult<ResolvedRole> {
        if user.admin {
            return Ok(ResolvedRole {
                role: ADMIN_ROLE.to_string(),
                source: RoleSource::Admin,
            });
        }

        let Some(resource) = resource else {
            return Ok(self.default());
        };

        let chain = self.hierarchy.ancestor_chain(resource).await?;
        for (distance, node) in chain.into_iter().enumerate() {
            let member = self
                .members
                .find_member(node, MemberType::User, user.id)
                .await?;
            if let Some(member) = member {
                debug!(
                    user_id = user.id,
                    target = %resource,
                    bound_at = %node,
                    distance,
                    role = %member.role,
                    "Resolved role binding"
                );
                return Ok(ResolvedRole {
                    role: member.role,
                    source: RoleSource::Binding {
                        resource: node,
                        distance,
                    },
                });
            }
        }

        Ok(self.default())
    }

    fn default(&self) -> ResolvedRole {
        ResolvedRole {
            role: self.default_role.clone(),
            source: RoleSource::Default,
        }
    }
}

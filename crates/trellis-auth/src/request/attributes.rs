//! Per-check request descriptor.

use serde::{Deserialize, Serialize};

use trellis_entity::{ResourceRef, ResourceType, UserIdentity};

use crate::rbac::ResourceKey;

/// Everything the authorizer knows about one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributesRecord {
    /// Caller identity.
    pub user: UserIdentity,
    /// Canonical verb: `get`, `create`, `update`, or `delete`.
    pub verb: String,
    pub api_group: String,
    pub api_version: String,
    /// Plural resource segment, e.g. `clusters`.
    pub resource: String,
    /// Subresource segment, empty when absent.
    pub sub_resource: String,
    /// Resource name (a numeric ID for hierarchy kinds), empty for collections.
    pub name: String,
    /// Value of the `scope` query parameter, empty when absent.
    pub scope: String,
    /// `false` for paths outside the API prefixes.
    pub resource_request: bool,
    /// Request path without the query string.
    pub path: String,
}

impl AttributesRecord {
    /// Resource key used for rule matching.
    pub fn resource_key(&self) -> ResourceKey<'_> {
        ResourceKey::new(&self.api_group, &self.resource, &self.sub_resource)
    }

    /// The hierarchy node this request targets, if any.
    ///
    /// Collection requests, non-resource requests, and resources outside the
    /// group/application/cluster tree have no target.
    pub fn target(&self) -> Option<ResourceRef> {
        if !self.resource_request || self.name.is_empty() {
            return None;
        }
        let kind = ResourceType::from_segment(&self.resource)?;
        let id = self.name.parse::<i64>().ok()?;
        Some(ResourceRef::new(kind, id))
    }
}

//! Role and permission rule definitions as loaded from YAML.

use serde::{Deserialize, Serialize};

/// Name of the synthetic role granted to platform administrators.
pub const ADMIN_ROLE: &str = "admin";

/// Wildcard accepted by every rule field.
pub const WILDCARD: &str = "*";

/// A single permission rule.
///
/// Resource requests are matched against `api_groups`, `resources`,
/// `verbs` and `scopes`; non-resource requests only against
/// `non_resource_urls`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyRule {
    /// API groups the rule applies to (`core`, or `*`).
    #[serde(rename = "apiGroups", default)]
    pub api_groups: Vec<String>,
    /// Composed resource names such as `clusters` or `clusters/shell`.
    #[serde(default)]
    pub resources: Vec<String>,
    /// Canonical verbs: `get`, `create`, `update`, `delete`, or `*`.
    #[serde(default)]
    pub verbs: Vec<String>,
    /// Scope patterns; `test/*` matches any scope under `test/`.
    #[serde(default)]
    pub scopes: Vec<String>,
    /// Path patterns for requests outside the API prefixes.
    #[serde(rename = "nonResourceURLs", default)]
    pub non_resource_urls: Vec<String>,
}

/// A named bundle of permission rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role name.
    pub name: String,
    /// Human-readable description.
    #[serde(default)]
    pub desc: String,
    /// Rules evaluated in order; any match grants access.
    #[serde(default)]
    pub rules: Vec<PolicyRule>,
}

/// Top-level shape of the role configuration document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleDefinition {
    /// Role names, most privileged first.
    #[serde(rename = "RolePriorityRankDesc")]
    pub priority_rank_desc: Vec<String>,
    /// Role used when a user has no binding on the resource or its ancestors.
    #[serde(rename = "DefaultRole")]
    pub default_role: String,
    /// Role bodies.
    #[serde(rename = "Roles")]
    pub roles: Vec<Role>,
}

//! Immutable, validated role store.

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::path::Path;

use tracing::info;

use trellis_core::error::AppError;
use trellis_core::result::AppResult;

use super::role::{PolicyRule, Role, RoleDefinition};

/// Role definitions indexed by name, with their priority ranking.
///
/// Built once at startup and shared behind an `Arc`; it is never mutated
/// afterwards, so readers need no locking.
#[derive(Debug, Clone)]
pub struct RoleStore {
    roles: HashMap<String, Role>,
    /// Role names, most privileged first.
    rank: Vec<String>,
    default_role: String,
}

impl RoleStore {
    /// Validate a parsed definition and build the store.
    ///
    /// Fails on duplicate roles, a priority entry or default role naming an
    /// unknown role, and a role missing from the priority list.
    pub fn from_definition(definition: RoleDefinition) -> AppResult<Self> {
        let mut roles = HashMap::with_capacity(definition.roles.len());
        for role in definition.roles {
            if roles.contains_key(&role.name) {
                return Err(AppError::configuration(format!(
                    "Role '{}' is defined more than once",
                    role.name
                )));
            }
            roles.insert(role.name.clone(), role);
        }

        let mut ranked = HashSet::with_capacity(definition.priority_rank_desc.len());
        for name in &definition.priority_rank_desc {
            if !roles.contains_key(name) {
                return Err(AppError::configuration(format!(
                    "Priority list references unknown role '{name}'"
                )));
            }
            if !ranked.insert(name.as_str()) {
                return Err(AppError::configuration(format!(
                    "Role '{name}' appears more than once in the priority list"
                )));
            }
        }

        let unranked: BTreeSet<&str> = roles
            .keys()
            .map(String::as_str)
            .filter(|name| !ranked.contains(name))
            .collect();
        if !unranked.is_empty() {
            return Err(AppError::configuration(format!(
                "Roles missing from the priority list: {}",
                unranked.into_iter().collect::<Vec<_>>().join(", ")
            )));
        }

        if !roles.contains_key(&definition.default_role) {
            return Err(AppError::configuration(format!(
                "Default role '{}' is not defined",
                definition.default_role
            )));
        }

        Ok(Self {
            roles,
            rank: definition.priority_rank_desc,
            default_role: definition.default_role,
        })
    }

    /// Parse and validate a YAML role document.
    pub fn from_yaml_str(source: &str) -> AppResult<Self> {
        let definition: RoleDefinition = serde_yaml::from_str(source)?;
        Self::from_definition(definition)
    }

    /// Read, parse, and validate a YAML role file.
    pub async fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::with_source(
                trellis_core::error::ErrorKind::Configuration,
                format!("Failed to read role file '{}'", path.display()),
                e,
            )
        })?;
        let store = Self::from_yaml_str(&source)?;
        info!(
            path = %path.display(),
            roles = store.rank.len(),
            default_role = %store.default_role,
            "Loaded role definitions"
        );
        Ok(store)
    }

    /// Rules of the named role, in declaration order.
    pub fn rules_for_role(&self, name: &str) -> Option<&[PolicyRule]> {
        self.roles.get(name).map(|r| r.rules.as_slice())
    }

    /// Look up a role by name.
    pub fn role(&self, name: &str) -> Option<&Role> {
        self.roles.get(name)
    }

    /// Name of the role used when no binding applies.
    pub fn default_role(&self) -> &str {
        &self.default_role
    }

    /// Rank of a role; lower is more privileged.
    pub fn priority_of(&self, name: &str) -> Option<usize> {
        self.rank.iter().position(|r| r == name)
    }

    /// Order two roles by privilege, most privileged first.
    ///
    /// Unknown roles sort after every known role.
    pub fn compare(&self, a: &str, b: &str) -> Ordering {
        let rank = |name: &str| self.priority_of(name).unwrap_or(usize::MAX);
        rank(a).cmp(&rank(b))
    }

    /// All roles in priority order.
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.rank.iter().filter_map(|name| self.roles.get(name))
    }

    /// Ensure every given role name is defined.
    ///
    /// Used at startup against the role names referenced by stored bindings.
    pub fn validate_role_names<I, S>(&self, names: I) -> AppResult<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let unknown: BTreeSet<String> = names
            .into_iter()
            .filter(|n| !self.roles.contains_key(n.as_ref()))
            .map(|n| n.as_ref().to_string())
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(AppError::configuration(format!(
                "Bindings reference undefined roles: {}",
                unknown.into_iter().collect::<Vec<_>>().join(", ")
            )))
        }
    }
}

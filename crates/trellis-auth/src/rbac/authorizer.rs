//! Combines role resolution and rule matching into a decision.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use trellis_core::result::AppResult;

use crate::member::{MemberResolver, RoleSource};
use crate::request::AttributesRecord;

use super::matcher::role_allows;
use super::store::RoleStore;

/// Outcome of authorizing one request. A denial is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub allowed: bool,
    pub reason: String,
}

impl Decision {
    /// An allow decision.
    pub fn allow(reason: impl Into<String>) -> Self {
        Self {
            allowed: true,
            reason: reason.into(),
        }
    }

    /// A deny decision.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self {
            allowed: false,
            reason: reason.into(),
        }
    }
}

/// Decides whether a request is allowed for the caller's effective role.
#[derive(Debug, Clone)]
pub struct Authorizer {
    roles: Arc<RoleStore>,
    members: MemberResolver,
}

impl Authorizer {
    /// Creates a new authorizer.
    pub fn new(roles: Arc<RoleStore>, members: MemberResolver) -> Self {
        Self { roles, members }
    }

    /// The role store backing this authorizer.
    pub fn roles(&self) -> &Arc<RoleStore> {
        &self.roles
    }

    /// Authorize one request.
    ///
    /// Lookup failures (including a target that does not exist) are errors;
    /// a role without a matching rule is a deny decision.
    pub async fn authorize(&self, record: &AttributesRecord) -> AppResult<Decision> {
        let resolved = self.members.resolve(&record.user, record.target()).await?;
        if resolved.source == RoleSource::Admin {
            return Ok(Decision::allow("admin"));
        }

        let Some(rules) = self.roles.rules_for_role(&resolved.role) else {
            warn!(
                user_id = record.user.id,
                role = %resolved.role,
                path = %record.path,
                "Binding references an undefined role"
            );
            return Ok(Decision::deny(format!(
                "role '{}' is not defined",
                resolved.role
            )));
        };

        let decision = match role_allows(record, rules) {
            Some(index) => Decision::allow(format!(
                "allowed by rule {index} of role '{}'",
                resolved.role
            )),
            None if record.resource_request => Decision::deny(format!(
                "role '{}' does not allow {} on {} in scope '{}'",
                resolved.role,
                record.verb,
                record.resource_key().canonical(),
                record.scope
            )),
            None => Decision::deny(format!(
                "role '{}' does not allow path {}",
                resolved.role, record.path
            )),
        };

        debug!(
            user_id = record.user.id,
            role = %resolved.role,
            priority = ?self.roles.priority_of(&resolved.role),
            verb = %record.verb,
            resource = %record.resource_key(),
            allowed = decision.allowed,
            "Authorization decision"
        );
        Ok(decision)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::member::HierarchyResolver;
    use crate::request::RequestInfoResolver;
    use trellis_database::MemoryStore;
    use trellis_entity::group::ROOT_GROUP_ID;
    use trellis_entity::{ResourceRef, UserIdentity};

    const ROLES: &str = r#"
RolePriorityRankDesc: [owner, guest]
DefaultRole: guest
Roles:
  - name: owner
    rules:
      - apiGroups: [core]
        resources: [clusters]
        verbs: ['*']
  - name: guest
    rules:
      - apiGroups: [core]
        resources: [clusters]
        verbs: [get]
"#;

    fn setup() -> (Arc<MemoryStore>, Authorizer, i64) {
        let store = Arc::new(MemoryStore::new());
        let g = store.create_group("g", ROOT_GROUP_ID).unwrap();
        let a = store.create_application("a", g.id).unwrap();
        let c = store.create_cluster("c", a.id).unwrap();
        let roles = Arc::new(RoleStore::from_yaml_str(ROLES).unwrap());
        let members = MemberResolver::new(
            HierarchyResolver::new(store.clone()),
            store.clone(),
            roles.default_role(),
        );
        (store, Authorizer::new(roles, members), c.id)
    }

    fn record(user: &UserIdentity, url: &str, method: &str) -> AttributesRecord {
        RequestInfoResolver::new(["apis"])
            .resolve(user, url, method)
            .unwrap()
    }

    #[tokio::test]
    async fn test_default_role_decisions() {
        let (_, authorizer, cluster) = setup();
        let user = UserIdentity::user(5, "u");

        let get = record(&user, &format!("/apis/core/v1/clusters/{cluster}"), "GET");
        assert!(authorizer.authorize(&get).await.unwrap().allowed);

        let delete = record(&user, &format!("/apis/core/v1/clusters/{cluster}"), "DELETE");
        let decision = authorizer.authorize(&delete).await.unwrap();
        assert!(!decision.allowed);
        assert!(decision.reason.contains("guest"));
    }

    #[tokio::test]
    async fn test_undefined_bound_role_denies() {
        let (store, authorizer, cluster) = setup();
        store
            .add_user_member(ResourceRef::cluster(cluster), 5, "retired", 1)
            .unwrap();

        let get = record(
            &UserIdentity::user(5, "u"),
            &format!("/apis/core/v1/clusters/{cluster}"),
            "GET",
        );
        let decision = authorizer.authorize(&get).await.unwrap();
        assert!(!decision.allowed);
        assert!(decision.reason.contains("retired"));
    }

    #[tokio::test]
    async fn test_admin_is_allowed() {
        let (_, authorizer, _) = setup();
        let rec = record(&UserIdentity::admin(1, "root"), "/apis/core/v1/groups", "POST");
        assert_eq!(authorizer.authorize(&rec).await.unwrap(), Decision::allow("admin"));
    }
}

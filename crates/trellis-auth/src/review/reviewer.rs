//! The batch access reviewer.
//!
//! Each API in a batch is reviewed independently:
//! 1. skip-listed paths are allowed without any lookup
//! 2. administrators are allowed outright, whatever the URL or method
//! 3. the URL and method are parsed into request attributes
//! 4. the request is evaluated against the caller's effective role
//!
//! Reviews run concurrently up to the configured limit. The first error
//! aborts the whole batch; no partial results are returned.

use std::sync::Arc;
use std::time::Instant;

use futures::future::try_join_all;
use tokio::sync::Semaphore;
use tracing::info;

use trellis_core::config::rbac::RbacConfig;
use trellis_core::error::AppError;
use trellis_core::result::AppResult;
use trellis_database::{MemberStore, ResourceStore};
use trellis_entity::UserIdentity;

use crate::member::{HierarchyResolver, MemberResolver};
use crate::rbac::{ADMIN_ROLE, Authorizer, RoleStore};
use crate::request::{RequestInfoResolver, SkipList};

use super::types::{Api, ReviewResult, ReviewResults};

/// Reviews batches of API operations on behalf of a user.
#[derive(Debug, Clone)]
pub struct AccessReviewer {
    skip_list: SkipList,
    request_info: RequestInfoResolver,
    authorizer: Authorizer,
    concurrency: usize,
}

impl AccessReviewer {
    /// Creates a reviewer from its parts.
    pub fn new(
        skip_list: SkipList,
        request_info: RequestInfoResolver,
        authorizer: Authorizer,
        concurrency: usize,
    ) -> Self {
        Self {
            skip_list,
            request_info,
            authorizer,
            concurrency: concurrency.max(1),
        }
    }

    /// Wires a reviewer from configuration, a role store, and data stores.
    pub fn from_config(
        config: &RbacConfig,
        roles: Arc<RoleStore>,
        resources: Arc<dyn ResourceStore>,
        members: Arc<dyn MemberStore>,
    ) -> AppResult<Self> {
        let resolver = MemberResolver::new(
            HierarchyResolver::new(resources),
            members,
            roles.default_role(),
        );
        Ok(Self::new(
            SkipList::from_config(&config.skip_paths)?,
            RequestInfoResolver::from_config(config),
            Authorizer::new(roles, resolver),
            config.review_concurrency,
        ))
    }

    /// The role store used for decisions.
    pub fn roles(&self) -> &Arc<RoleStore> {
        self.authorizer.roles()
    }

    /// Review every API in the batch for `user`.
    pub async fn review(&self, user: &UserIdentity, apis: &[Api]) -> AppResult<ReviewResults> {
        let started = Instant::now();
        let sem = Arc::new(Semaphore::new(self.concurrency));

        let tasks = apis.iter().map(|api| {
            let s = sem.clone();
            async move {
                let _permit = s
                    .acquire()
                    .await
                    .map_err(|_| AppError::internal("Review semaphore closed"))?;
                let result = self.review_one(user, api).await?;
                Ok::<_, AppError>((api, result))
            }
        });
        let decided = try_join_all(tasks).await?;

        let mut results = ReviewResults::new();
        let mut allowed = 0usize;
        for (api, result) in decided {
            if result.allowed {
                allowed += 1;
            }
            results
                .entry(api.url.clone())
                .or_default()
                .insert(api.method.clone(), result);
        }

        info!(
            user_id = user.id,
            apis = apis.len(),
            allowed,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Access review completed"
        );
        Ok(results)
    }

    async fn review_one(&self, user: &UserIdentity, api: &Api) -> AppResult<ReviewResult> {
        if self.skip_list.should_skip(&api.method, &api.url) {
            return Ok(ReviewResult {
                allowed: true,
                reason: "skipped".to_string(),
            });
        }

        if user.admin {
            return Ok(ReviewResult {
                allowed: true,
                reason: ADMIN_ROLE.to_string(),
            });
        }

        let record = self.request_info.resolve(user, &api.url, &api.method)?;
        Ok(self.authorizer.authorize(&record).await?.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::error::ErrorKind;
    use trellis_database::MemoryStore;
    use trellis_entity::group::ROOT_GROUP_ID;

    const ROLES: &str = r#"
RolePriorityRankDesc: [guest]
DefaultRole: guest
Roles:
  - name: guest
    rules:
      - apiGroups: [core]
        resources: [clusters/status]
        verbs: [get]
"#;

    fn reviewer(store: Arc<MemoryStore>) -> AccessReviewer {
        let roles = Arc::new(RoleStore::from_yaml_str(ROLES).unwrap());
        AccessReviewer::from_config(&RbacConfig::default(), roles, store.clone(), store).unwrap()
    }

    #[tokio::test]
    async fn test_results_keyed_by_url_and_method() {
        let store = Arc::new(MemoryStore::new());
        let g = store.create_group("g", ROOT_GROUP_ID).unwrap();
        let a = store.create_application("a", g.id).unwrap();
        let c = store.create_cluster("c", a.id).unwrap();
        let url = format!("/apis/core/v1/clusters/{}/status", c.id);

        let results = reviewer(store)
            .review(
                &UserIdentity::user(3, "u"),
                &[Api::new(&url, "GET"), Api::new(&url, "PUT"), Api::new("/health", "GET")],
            )
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[&url]["GET"].allowed);
        assert!(!results[&url]["PUT"].allowed);
        assert_eq!(results["/health"]["GET"].reason, "skipped");
    }

    #[tokio::test]
    async fn test_missing_resource_aborts_batch() {
        let store = Arc::new(MemoryStore::new());
        let err = reviewer(store)
            .review(
                &UserIdentity::user(3, "u"),
                &[
                    Api::new("/health", "GET"),
                    Api::new("/apis/core/v1/clusters/77/status", "GET"),
                ],
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let results = reviewer(Arc::new(MemoryStore::new()))
            .review(&UserIdentity::user(3, "u"), &[])
            .await
            .unwrap();
        assert!(results.is_empty());
    }
}

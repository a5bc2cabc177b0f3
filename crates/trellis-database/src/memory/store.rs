//! In-memory resource and member store backed by `dashmap`.
//!
//! Maintains group traversal IDs on creation and on transfer the same way
//! the relational schema expects them, so it can stand in for PostgreSQL in
//! development and tests.

use std::collections::BTreeSet;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;

use trellis_core::error::AppError;
use trellis_core::result::AppResult;
use trellis_entity::application::Application;
use trellis_entity::cluster::Cluster;
use trellis_entity::group::model::child_traversal_ids;
use trellis_entity::group::{Group, ROOT_GROUP_ID};
use trellis_entity::member::{Member, MemberType};
use trellis_entity::pipelinerun::PipelineRun;
use trellis_entity::resource::{ResourceRef, ResourceType};
use trellis_entity::template::{Template, TemplateRelease};

use super::seed::Seed;
use crate::store::{MemberStore, ResourceStore};

/// Process-local store for the resource tree and role bindings.
#[derive(Debug, Default)]
pub struct MemoryStore {
    groups: DashMap<i64, Group>,
    applications: DashMap<i64, Application>,
    clusters: DashMap<i64, Cluster>,
    templates: DashMap<i64, Template>,
    releases: DashMap<i64, TemplateRelease>,
    pipeline_runs: DashMap<i64, PipelineRun>,
    members: DashMap<i64, Member>,
    /// Last issued ID; shared by every table.
    last_id: AtomicI64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from seed data. Groups must be listed parent-first.
    pub fn from_seed(seed: Seed) -> AppResult<Self> {
        let store = Self::new();
        let mut max_id = 0;

        for g in seed.groups {
            let parent_traversal = store.parent_traversal(g.parent_id)?;
            let group = Group {
                id: g.id,
                path: g.path.unwrap_or_else(|| g.name.clone()),
                name: g.name,
                parent_id: g.parent_id,
                traversal_ids: child_traversal_ids(parent_traversal.as_deref(), g.id),
            };
            max_id = max_id.max(group.id);
            store.groups.insert(group.id, group);
        }
        for app in seed.applications {
            max_id = max_id.max(app.id);
            store.applications.insert(app.id, app);
        }
        for cluster in seed.clusters {
            max_id = max_id.max(cluster.id);
            store.clusters.insert(cluster.id, cluster);
        }
        for template in seed.templates {
            max_id = max_id.max(template.id);
            store.templates.insert(template.id, template);
        }
        for release in seed.template_releases {
            max_id = max_id.max(release.id);
            store.releases.insert(release.id, release);
        }
        for run in seed.pipeline_runs {
            max_id = max_id.max(run.id);
            store.pipeline_runs.insert(run.id, run);
        }
        for member in seed.members {
            max_id = max_id.max(member.id);
            store.members.insert(member.id, member);
        }

        store.last_id.store(max_id, Ordering::SeqCst);
        debug!(
            groups = store.groups.len(),
            members = store.members.len(),
            "Seeded in-memory store"
        );
        Ok(store)
    }

    /// Load seed data from a JSON file.
    pub async fn load_seed_file(path: &str) -> AppResult<Self> {
        let raw = tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::configuration(format!("Failed to read seed file '{path}': {e}"))
        })?;
        let seed: Seed = serde_json::from_str(&raw)?;
        Self::from_seed(seed)
    }

    fn next_id(&self) -> i64 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn parent_traversal(&self, parent_id: i64) -> AppResult<Option<String>> {
        if parent_id == ROOT_GROUP_ID {
            return Ok(None);
        }
        self.groups
            .get(&parent_id)
            .map(|g| Some(g.traversal_ids.clone()))
            .ok_or_else(|| AppError::not_found(format!("Parent group {parent_id} not found")))
    }

    /// Create a group under `parent_id` (or [`ROOT_GROUP_ID`]).
    pub fn create_group(&self, name: &str, parent_id: i64) -> AppResult<Group> {
        let parent_traversal = self.parent_traversal(parent_id)?;
        let id = self.next_id();
        let group = Group {
            id,
            name: name.to_string(),
            path: name.to_string(),
            parent_id,
            traversal_ids: child_traversal_ids(parent_traversal.as_deref(), id),
        };
        self.groups.insert(id, group.clone());
        Ok(group)
    }

    /// Create an application owned by `group_id`.
    pub fn create_application(&self, name: &str, group_id: i64) -> AppResult<Application> {
        if !self.groups.contains_key(&group_id) {
            return Err(AppError::not_found(format!("Group {group_id} not found")));
        }
        let app = Application {
            id: self.next_id(),
            group_id,
            name: name.to_string(),
        };
        self.applications.insert(app.id, app.clone());
        Ok(app)
    }

    /// Create a cluster of `application_id`.
    pub fn create_cluster(&self, name: &str, application_id: i64) -> AppResult<Cluster> {
        if !self.applications.contains_key(&application_id) {
            return Err(AppError::not_found(format!(
                "Application {application_id} not found"
            )));
        }
        let cluster = Cluster {
            id: self.next_id(),
            application_id,
            name: name.to_string(),
        };
        self.clusters.insert(cluster.id, cluster.clone());
        Ok(cluster)
    }

    /// Create a template, optionally owned by a group (`0` for none).
    pub fn create_template(&self, name: &str, group_id: i64) -> AppResult<Template> {
        if group_id != ROOT_GROUP_ID && !self.groups.contains_key(&group_id) {
            return Err(AppError::not_found(format!("Group {group_id} not found")));
        }
        let template = Template {
            id: self.next_id(),
            group_id,
            name: name.to_string(),
        };
        self.templates.insert(template.id, template.clone());
        Ok(template)
    }

    /// Create a release of `template_id`.
    pub fn create_template_release(
        &self,
        name: &str,
        template_id: i64,
    ) -> AppResult<TemplateRelease> {
        if !self.templates.contains_key(&template_id) {
            return Err(AppError::not_found(format!(
                "Template {template_id} not found"
            )));
        }
        let release = TemplateRelease {
            id: self.next_id(),
            template_id,
            name: name.to_string(),
        };
        self.releases.insert(release.id, release.clone());
        Ok(release)
    }

    /// Record a pipeline run against `cluster_id`.
    pub fn create_pipeline_run(&self, action: &str, cluster_id: i64) -> AppResult<PipelineRun> {
        if !self.clusters.contains_key(&cluster_id) {
            return Err(AppError::not_found(format!("Cluster {cluster_id} not found")));
        }
        let run = PipelineRun {
            id: self.next_id(),
            cluster_id,
            action: action.to_string(),
        };
        self.pipeline_runs.insert(run.id, run.clone());
        Ok(run)
    }

    fn resource_exists(&self, resource: ResourceRef) -> bool {
        match resource.kind {
            ResourceType::Group => self.groups.contains_key(&resource.id),
            ResourceType::Application => self.applications.contains_key(&resource.id),
            ResourceType::Cluster => self.clusters.contains_key(&resource.id),
            ResourceType::Template => self.templates.contains_key(&resource.id),
            ResourceType::TemplateRelease => self.releases.contains_key(&resource.id),
            ResourceType::PipelineRun => self.pipeline_runs.contains_key(&resource.id),
        }
    }

    /// Bind `role` to a user on `resource`.
    ///
    /// Fails with `Conflict` if the user already has a live binding there.
    pub fn add_user_member(
        &self,
        resource: ResourceRef,
        user_id: i64,
        role: &str,
        granted_by: i64,
    ) -> AppResult<Member> {
        if !self.resource_exists(resource) {
            return Err(AppError::not_found(format!("Resource {resource} not found")));
        }
        let duplicate = self.members.iter().any(|m| {
            m.is_live()
                && m.resource() == resource
                && m.member_type == MemberType::User
                && m.membername_id == user_id
        });
        if duplicate {
            return Err(AppError::conflict(format!(
                "User {user_id} is already a member of {resource}"
            )));
        }

        let now = Utc::now();
        let member = Member {
            id: self.next_id(),
            resource_type: resource.kind,
            resource_id: resource.id,
            member_type: MemberType::User,
            membername_id: user_id,
            role: role.to_string(),
            granted_by,
            created_at: now,
            updated_at: now,
            deleted_ts: 0,
        };
        self.members.insert(member.id, member.clone());
        Ok(member)
    }

    /// Soft-delete a binding.
    pub fn remove_member(&self, member_id: i64) -> AppResult<()> {
        let mut member = self
            .members
            .get_mut(&member_id)
            .filter(|m| m.is_live())
            .ok_or_else(|| AppError::not_found(format!("Member {member_id} not found")))?;
        member.deleted_ts = Utc::now().timestamp().max(1);
        Ok(())
    }

    /// Move a group (and its whole subtree) under `new_parent_id`.
    ///
    /// Rewrites `traversal_ids` of the group and every descendant. Moving a
    /// group beneath itself or one of its descendants is rejected.
    pub fn transfer_group(&self, group_id: i64, new_parent_id: i64) -> AppResult<Group> {
        let old_prefix = self
            .groups
            .get(&group_id)
            .map(|g| g.traversal_ids.clone())
            .ok_or_else(|| AppError::not_found(format!("Group {group_id} not found")))?;

        let parent_traversal = self.parent_traversal(new_parent_id)?;
        if let Some(parent) = &parent_traversal {
            let lands_in_subtree = parent
                .split(',')
                .any(|id| id.trim() == group_id.to_string());
            if lands_in_subtree {
                return Err(AppError::validation(format!(
                    "Cannot transfer group {group_id} into its own subtree"
                )));
            }
        }
        let new_prefix = child_traversal_ids(parent_traversal.as_deref(), group_id);

        let mut subtree = Vec::new();
        for entry in self.groups.iter() {
            if entry.id == group_id || entry.ancestor_ids()?.contains(&group_id) {
                subtree.push(entry.id);
            }
        }

        for id in subtree {
            if let Some(mut g) = self.groups.get_mut(&id) {
                let suffix = g.traversal_ids[old_prefix.len()..].to_string();
                g.traversal_ids = format!("{new_prefix}{suffix}");
                if id == group_id {
                    g.parent_id = new_parent_id;
                }
            }
        }

        debug!(group_id, new_parent_id, "Transferred group");
        self.groups
            .get(&group_id)
            .map(|g| g.clone())
            .ok_or_else(|| AppError::not_found(format!("Group {group_id} not found")))
    }
}

#[async_trait]
impl ResourceStore for MemoryStore {
    async fn find_group(&self, id: i64) -> AppResult<Option<Group>> {
        Ok(self.groups.get(&id).map(|g| g.clone()))
    }

    async fn find_application(&self, id: i64) -> AppResult<Option<Application>> {
        Ok(self.applications.get(&id).map(|a| a.clone()))
    }

    async fn find_cluster(&self, id: i64) -> AppResult<Option<Cluster>> {
        Ok(self.clusters.get(&id).map(|c| c.clone()))
    }

    async fn find_template(&self, id: i64) -> AppResult<Option<Template>> {
        Ok(self.templates.get(&id).map(|t| t.clone()))
    }

    async fn find_template_release(&self, id: i64) -> AppResult<Option<TemplateRelease>> {
        Ok(self.releases.get(&id).map(|r| r.clone()))
    }

    async fn find_pipeline_run(&self, id: i64) -> AppResult<Option<PipelineRun>> {
        Ok(self.pipeline_runs.get(&id).map(|p| p.clone()))
    }
}

#[async_trait]
impl MemberStore for MemoryStore {
    async fn find_member(
        &self,
        resource: ResourceRef,
        member_type: MemberType,
        membername_id: i64,
    ) -> AppResult<Option<Member>> {
        Ok(self
            .members
            .iter()
            .find(|m| {
                m.is_live()
                    && m.resource() == resource
                    && m.member_type == member_type
                    && m.membername_id == membername_id
            })
            .map(|m| m.clone()))
    }

    async fn bound_role_names(&self) -> AppResult<Vec<String>> {
        let roles: BTreeSet<String> = self
            .members
            .iter()
            .filter(|m| m.is_live())
            .map(|m| m.role.clone())
            .collect();
        Ok(roles.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use trellis_core::error::ErrorKind;

    #[test]
    fn test_nested_groups_get_traversal_ids() {
        let store = MemoryStore::new();
        let a = store.create_group("a", ROOT_GROUP_ID).unwrap();
        let b = store.create_group("b", a.id).unwrap();
        let c = store.create_group("c", b.id).unwrap();

        assert_eq!(a.traversal_ids, a.id.to_string());
        assert_eq!(c.traversal_ids, format!("{},{},{}", a.id, b.id, c.id));
    }

    #[test]
    fn test_create_under_missing_parent_fails() {
        let store = MemoryStore::new();
        let err = store.create_group("orphan", 99).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
        let err = store.create_cluster("c", 99).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_transfer_rewrites_subtree() {
        let store = MemoryStore::new();
        let a = store.create_group("a", ROOT_GROUP_ID).unwrap();
        let b = store.create_group("b", a.id).unwrap();
        let c = store.create_group("c", b.id).unwrap();
        let x = store.create_group("x", ROOT_GROUP_ID).unwrap();

        let moved = store.transfer_group(b.id, x.id).unwrap();
        assert_eq!(moved.parent_id, x.id);
        assert_eq!(moved.traversal_ids, format!("{},{}", x.id, b.id));

        let c = store.find_group(c.id).await.unwrap().unwrap();
        assert_eq!(c.ancestor_ids().unwrap(), vec![x.id, b.id, c.id]);

        let a = store.find_group(a.id).await.unwrap().unwrap();
        assert_eq!(a.traversal_ids, a.id.to_string());
    }

    #[test]
    fn test_transfer_into_own_subtree_is_rejected() {
        let store = MemoryStore::new();
        let a = store.create_group("a", ROOT_GROUP_ID).unwrap();
        let b = store.create_group("b", a.id).unwrap();

        let err = store.transfer_group(a.id, b.id).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_member_lifecycle() {
        let store = MemoryStore::new();
        let g = store.create_group("g", ROOT_GROUP_ID).unwrap();
        let member = store
            .add_user_member(ResourceRef::group(g.id), 7, "owner", 1)
            .unwrap();

        let dup = store
            .add_user_member(ResourceRef::group(g.id), 7, "guest", 1)
            .unwrap_err();
        assert_eq!(dup.kind, ErrorKind::Conflict);

        let found = store
            .find_member(ResourceRef::group(g.id), MemberType::User, 7)
            .await
            .unwrap();
        assert_eq!(found.map(|m| m.role), Some("owner".to_string()));
        assert_eq!(store.bound_role_names().await.unwrap(), vec!["owner"]);

        store.remove_member(member.id).unwrap();
        assert!(
            store
                .find_member(ResourceRef::group(g.id), MemberType::User, 7)
                .await
                .unwrap()
                .is_none()
        );
        assert!(store.bound_role_names().await.unwrap().is_empty());
    }
}

//! Seed document for the in-memory store.

use serde::{Deserialize, Serialize};

use trellis_entity::application::Application;
use trellis_entity::cluster::Cluster;
use trellis_entity::member::Member;
use trellis_entity::pipelinerun::PipelineRun;
use trellis_entity::template::{Template, TemplateRelease};

/// A group row without traversal IDs; those are derived while seeding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSeed {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub parent_id: i64,
}

/// Initial contents of a [`MemoryStore`](super::MemoryStore).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Seed {
    /// Groups, listed parent-first.
    pub groups: Vec<GroupSeed>,
    pub applications: Vec<Application>,
    pub clusters: Vec<Cluster>,
    pub templates: Vec<Template>,
    pub template_releases: Vec<TemplateRelease>,
    pub pipeline_runs: Vec<PipelineRun>,
    pub members: Vec<Member>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryStore;
    use crate::store::{MemberStore, ResourceStore};
    use trellis_core::error::ErrorKind;
    use trellis_entity::member::MemberType;
    use trellis_entity::resource::ResourceRef;

    const SEED: &str = r#"{
        "groups": [
            {"id": 1, "name": "platform"},
            {"id": 2, "name": "payments", "parent_id": 1}
        ],
        "applications": [{"id": 10, "group_id": 2, "name": "ledger"}],
        "clusters": [{"id": 100, "application_id": 10, "name": "ledger-test"}],
        "members": [{
            "id": 500, "resource_type": "group", "resource_id": 1,
            "member_type": "user", "membername_id": 7,
            "role": "owner", "granted_by": 1
        }]
    }"#;

    #[tokio::test]
    async fn test_seed_derives_traversal_ids() {
        let seed: Seed = serde_json::from_str(SEED).unwrap();
        let store = MemoryStore::from_seed(seed).unwrap();

        let payments = store.find_group(2).await.unwrap().unwrap();
        assert_eq!(payments.traversal_ids, "1,2");
        assert_eq!(payments.path, "payments");
        assert!(store.find_cluster(100).await.unwrap().is_some());

        let member = store
            .find_member(ResourceRef::group(1), MemberType::User, 7)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(member.role, "owner");
        assert!(member.is_live());

        let created = store.create_group("late", 2).unwrap();
        assert!(created.id > 500);
    }

    #[test]
    fn test_child_listed_before_parent_is_rejected() {
        let seed: Seed = serde_json::from_str(
            r#"{"groups": [{"id": 2, "name": "b", "parent_id": 1}, {"id": 1, "name": "a"}]}"#,
        )
        .unwrap();
        let err = MemoryStore::from_seed(seed).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}

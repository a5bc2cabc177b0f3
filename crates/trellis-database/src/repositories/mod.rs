//! PostgreSQL repository implementations and the [`PgStore`] facade.

pub mod application;
pub mod cluster;
pub mod group;
pub mod member;
pub mod pipelinerun;
pub mod template;

use async_trait::async_trait;
use sqlx::PgPool;

use trellis_core::result::AppResult;
use trellis_entity::application::Application;
use trellis_entity::cluster::Cluster;
use trellis_entity::group::Group;
use trellis_entity::member::{Member, MemberType};
use trellis_entity::pipelinerun::PipelineRun;
use trellis_entity::resource::ResourceRef;
use trellis_entity::template::{Template, TemplateRelease};

use crate::store::{MemberStore, ResourceStore};

pub use application::ApplicationRepository;
pub use cluster::ClusterRepository;
pub use group::GroupRepository;
pub use member::MemberRepository;
pub use pipelinerun::PipelineRunRepository;
pub use template::TemplateRepository;

/// Serves [`ResourceStore`] and [`MemberStore`] from PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgStore {
    groups: GroupRepository,
    applications: ApplicationRepository,
    clusters: ClusterRepository,
    templates: TemplateRepository,
    pipeline_runs: PipelineRunRepository,
    members: MemberRepository,
}

impl PgStore {
    /// Create all repositories over one pool.
    pub fn new(pool: PgPool) -> Self {
        Self {
            groups: GroupRepository::new(pool.clone()),
            applications: ApplicationRepository::new(pool.clone()),
            clusters: ClusterRepository::new(pool.clone()),
            templates: TemplateRepository::new(pool.clone()),
            pipeline_runs: PipelineRunRepository::new(pool.clone()),
            members: MemberRepository::new(pool),
        }
    }
}

#[async_trait]
impl ResourceStore for PgStore {
    async fn find_group(&self, id: i64) -> AppResult<Option<Group>> {
        self.groups.find_by_id(id).await
    }

    async fn find_application(&self, id: i64) -> AppResult<Option<Application>> {
        self.applications.find_by_id(id).await
    }

    async fn find_cluster(&self, id: i64) -> AppResult<Option<Cluster>> {
        self.clusters.find_by_id(id).await
    }

    async fn find_template(&self, id: i64) -> AppResult<Option<Template>> {
        self.templates.find_by_id(id).await
    }

    async fn find_template_release(&self, id: i64) -> AppResult<Option<TemplateRelease>> {
        self.templates.find_release_by_id(id).await
    }

    async fn find_pipeline_run(&self, id: i64) -> AppResult<Option<PipelineRun>> {
        self.pipeline_runs.find_by_id(id).await
    }
}

#[async_trait]
impl MemberStore for PgStore {
    async fn find_member(
        &self,
        resource: ResourceRef,
        member_type: MemberType,
        membername_id: i64,
    ) -> AppResult<Option<Member>> {
        self.members
            .find_one(resource.kind, resource.id, member_type, membername_id)
            .await
    }

    async fn bound_role_names(&self) -> AppResult<Vec<String>> {
        self.members.distinct_roles().await
    }
}

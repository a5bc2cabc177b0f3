//! Store traits consumed by the authorizer.
//!
//! Absence is reported as `Ok(None)`; `Err` is reserved for real failures so
//! callers can tell a missing row from a broken backend.

use async_trait::async_trait;

use trellis_core::result::AppResult;
use trellis_entity::application::Application;
use trellis_entity::cluster::Cluster;
use trellis_entity::group::Group;
use trellis_entity::member::{Member, MemberType};
use trellis_entity::pipelinerun::PipelineRun;
use trellis_entity::resource::ResourceRef;
use trellis_entity::template::{Template, TemplateRelease};

/// Read access to the resource hierarchy.
#[async_trait]
pub trait ResourceStore: Send + Sync + 'static {
    /// Find a group by ID.
    async fn find_group(&self, id: i64) -> AppResult<Option<Group>>;

    /// Find an application by ID.
    async fn find_application(&self, id: i64) -> AppResult<Option<Application>>;

    /// Find a cluster by ID.
    async fn find_cluster(&self, id: i64) -> AppResult<Option<Cluster>>;

    /// Find a template by ID.
    async fn find_template(&self, id: i64) -> AppResult<Option<Template>>;

    /// Find a template release by ID.
    async fn find_template_release(&self, id: i64) -> AppResult<Option<TemplateRelease>>;

    /// Find a pipeline run by ID.
    async fn find_pipeline_run(&self, id: i64) -> AppResult<Option<PipelineRun>>;
}

/// Read access to role bindings.
#[async_trait]
pub trait MemberStore: Send + Sync + 'static {
    /// Find the live binding of one member directly on one resource.
    async fn find_member(
        &self,
        resource: ResourceRef,
        member_type: MemberType,
        membername_id: i64,
    ) -> AppResult<Option<Member>>;

    /// Distinct role names referenced by live bindings.
    async fn bound_role_names(&self) -> AppResult<Vec<String>>;
}

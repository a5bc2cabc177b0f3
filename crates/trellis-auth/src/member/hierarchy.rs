//! Walks the containment tree from a resource up to the root group.
//!
//! Containment:
//! - cluster → application → group chain
//! - pipelinerun → cluster
//! - templaterelease → template → group chain (platform templates stop at the template)
//! - group → its traversal IDs, nearest first

use std::sync::Arc;

use trellis_core::error::AppError;
use trellis_core::result::AppResult;
use trellis_database::ResourceStore;
use trellis_entity::group::ROOT_GROUP_ID;
use trellis_entity::{ResourceRef, ResourceType};

/// Produces nearest-first ancestor chains for membership lookup.
#[derive(Clone)]
pub struct HierarchyResolver {
    resources: Arc<dyn ResourceStore>,
}

impl std::fmt::Debug for HierarchyResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HierarchyResolver").finish()
    }
}

impl HierarchyResolver {
    /// Creates a resolver over the given resource store.
    pub fn new(resources: Arc<dyn ResourceStore>) -> Self {
        Self { resources }
    }

    /// Returns the chain starting with `resource` itself and ending at its
    /// top-level group.
    ///
    /// Any missing link is `NotFound`.
    pub async fn ancestor_chain(&self, resource: ResourceRef) -> AppResult<Vec<ResourceRef>> {
        let mut chain = vec![resource];
        let mut current = resource;

        loop {
            let parent = match current.kind {
                ResourceType::Group => {
                    let group = self
                        .resources
                        .find_group(current.id)
                        .await?
                        .ok_or_else(|| missing(current))?;
                    let ancestors = group.ancestor_ids()?;
                    // ancestors ends with the group itself, already in the chain
                    chain.extend(ancestors.into_iter().rev().skip(1).map(ResourceRef::group));
                    return Ok(chain);
                }
                ResourceType::Application => {
                    let app = self
                        .resources
                        .find_application(current.id)
                        .await?
                        .ok_or_else(|| missing(current))?;
                    ResourceRef::group(app.group_id)
                }
                ResourceType::Cluster => {
                    let cluster = self
                        .resources
                        .find_cluster(current.id)
                        .await?
                        .ok_or_else(|| missing(current))?;
                    ResourceRef::application(cluster.application_id)
                }
                ResourceType::Template => {
                    let template = self
                        .resources
                        .find_template(current.id)
                        .await?
                        .ok_or_else(|| missing(current))?;
                    if template.group_id == ROOT_GROUP_ID {
                        return Ok(chain);
                    }
                    ResourceRef::group(template.group_id)
                }
                ResourceType::TemplateRelease => {
                    let release = self
                        .resources
                        .find_template_release(current.id)
                        .await?
                        .ok_or_else(|| missing(current))?;
                    ResourceRef::new(ResourceType::Template, release.template_id)
                }
                ResourceType::PipelineRun => {
                    let run = self
                        .resources
                        .find_pipeline_run(current.id)
                        .await?
                        .ok_or_else(|| missing(current))?;
                    ResourceRef::cluster(run.cluster_id)
                }
            };
            chain.push(parent);
            current = parent;
        }
    }
}

fn missing(resource: ResourceRef) -> AppError {
    AppError::not_found(format!("{} {} not found", resource.kind, resource.id))
}

//! Resource kind enumeration and typed resource references.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kinds of resources that can carry role bindings.
///
/// Containment: group ⊃ group | application | template,
/// application ⊃ cluster, cluster ⊃ pipelinerun, template ⊃ templaterelease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "resource_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    /// An organizational group (may nest).
    Group,
    /// An application owned by a group.
    Application,
    /// A deployed cluster of an application.
    Cluster,
    /// A deployment template, optionally owned by a group.
    Template,
    /// A released version of a template.
    TemplateRelease,
    /// A pipeline run executed against a cluster.
    PipelineRun,
}

impl ResourceType {
    /// Return the singular lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::Application => "application",
            Self::Cluster => "cluster",
            Self::Template => "template",
            Self::TemplateRelease => "templaterelease",
            Self::PipelineRun => "pipelinerun",
        }
    }

    /// Return the plural path segment used in API URLs (`/clusters/{id}`).
    pub fn segment(&self) -> &'static str {
        match self {
            Self::Group => "groups",
            Self::Application => "applications",
            Self::Cluster => "clusters",
            Self::Template => "templates",
            Self::TemplateRelease => "templatereleases",
            Self::PipelineRun => "pipelineruns",
        }
    }

    /// Map an API path segment back to a resource kind.
    ///
    /// Returns `None` for resources that are not part of the hierarchy
    /// (e.g. `users`, `roles`).
    pub fn from_segment(segment: &str) -> Option<Self> {
        match segment {
            "groups" => Some(Self::Group),
            "applications" => Some(Self::Application),
            "clusters" => Some(Self::Cluster),
            "templates" => Some(Self::Template),
            "templatereleases" => Some(Self::TemplateRelease),
            "pipelineruns" => Some(Self::PipelineRun),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = trellis_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.to_lowercase();
        match lowered.as_str() {
            "group" => Ok(Self::Group),
            "application" => Ok(Self::Application),
            "cluster" => Ok(Self::Cluster),
            "template" => Ok(Self::Template),
            "templaterelease" => Ok(Self::TemplateRelease),
            "pipelinerun" => Ok(Self::PipelineRun),
            other => Self::from_segment(other).ok_or_else(|| {
                trellis_core::AppError::validation(format!("Invalid resource type: '{s}'"))
            }),
        }
    }
}

/// A typed pointer to one node of the resource tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    /// The kind of resource.
    pub kind: ResourceType,
    /// Numeric resource identifier.
    pub id: i64,
}

impl ResourceRef {
    /// Create a new resource reference.
    pub fn new(kind: ResourceType, id: i64) -> Self {
        Self { kind, id }
    }

    /// Shorthand for a group reference.
    pub fn group(id: i64) -> Self {
        Self::new(ResourceType::Group, id)
    }

    /// Shorthand for an application reference.
    pub fn application(id: i64) -> Self {
        Self::new(ResourceType::Application, id)
    }

    /// Shorthand for a cluster reference.
    pub fn cluster(id: i64) -> Self {
        Self::new(ResourceType::Cluster, id)
    }
}

impl fmt::Display for ResourceRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind.segment(), self.id)
    }
}

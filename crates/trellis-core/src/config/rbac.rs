//! Access review configuration.

use serde::{Deserialize, Serialize};

/// Role definitions, request parsing, and skip-list settings for the access reviewer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RbacConfig {
    /// Path to the YAML role definition file.
    #[serde(default = "default_role_file")]
    pub role_file: String,
    /// Upper bound on APIs resolved concurrently within one review batch.
    #[serde(default = "default_review_concurrency")]
    pub review_concurrency: usize,
    /// Leading path segments that mark a resource request (`/apis/...`).
    #[serde(default = "default_api_prefixes")]
    pub api_prefixes: Vec<String>,
    /// Requests allowed without any RBAC evaluation.
    #[serde(default = "default_skip_paths")]
    pub skip_paths: Vec<SkipPathConfig>,
}

/// A method + path-regex pair on the skip-list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkipPathConfig {
    /// HTTP method, or `"*"` for any method.
    #[serde(default = "default_skip_method")]
    pub method: String,
    /// Regular expression matched against the request path.
    pub pattern: String,
}

impl Default for RbacConfig {
    fn default() -> Self {
        Self {
            role_file: default_role_file(),
            review_concurrency: default_review_concurrency(),
            api_prefixes: default_api_prefixes(),
            skip_paths: default_skip_paths(),
        }
    }
}

fn default_role_file() -> String {
    "config/roles.yaml".to_string()
}

fn default_review_concurrency() -> usize {
    8
}

fn default_api_prefixes() -> Vec<String> {
    vec!["apis".to_string()]
}

fn default_skip_method() -> String {
    "*".to_string()
}

fn default_skip_paths() -> Vec<SkipPathConfig> {
    [
        "^/apis/front/.*",
        "^/health",
        "^/metrics",
        "^/apis/login",
        "^/apis/core/v1/roles",
        "^/apis/internal/.*",
    ]
    .into_iter()
    .map(|pattern| SkipPathConfig {
        method: default_skip_method(),
        pattern: pattern.to_string(),
    })
    .collect()
}

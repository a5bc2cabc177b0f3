//! Resource and membership store selection.

use serde::{Deserialize, Serialize};

/// Which backend serves resource and member lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Store backend: `"postgres"` or `"memory"`.
    #[serde(default = "default_backend")]
    pub backend: String,
    /// Optional JSON seed file loaded into the memory backend at startup.
    #[serde(default)]
    pub seed_file: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            seed_file: None,
        }
    }
}

fn default_backend() -> String {
    "postgres".to_string()
}

//! Caller identity supplied by the authentication layer.

use serde::{Deserialize, Serialize};

/// The authenticated user on whose behalf an access decision is made.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserIdentity {
    /// User ID; bindings are looked up by this value.
    pub id: i64,
    /// Display name, used only for logging.
    #[serde(default)]
    pub name: String,
    /// Platform administrators bypass role evaluation entirely.
    #[serde(default)]
    pub admin: bool,
}

impl UserIdentity {
    /// Create a non-admin identity.
    pub fn user(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            admin: false,
        }
    }

    /// Create an administrator identity.
    pub fn admin(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            admin: true,
        }
    }
}

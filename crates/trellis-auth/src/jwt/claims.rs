//! JWT claims carried by bearer tokens.

use serde::{Deserialize, Serialize};

use trellis_entity::UserIdentity;

/// JWT claims payload identifying the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, the user ID.
    pub sub: i64,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Platform administrator flag.
    #[serde(default)]
    pub admin: bool,
    /// Issued-at timestamp (seconds since epoch).
    #[serde(default)]
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch).
    pub exp: i64,
}

impl Claims {
    /// The identity these claims describe.
    pub fn identity(&self) -> UserIdentity {
        UserIdentity {
            id: self.sub,
            name: self.name.clone(),
            admin: self.admin,
        }
    }
}

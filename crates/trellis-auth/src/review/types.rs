//! Access review input and output types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::rbac::Decision;

/// One API operation to review.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Api {
    /// Request URL, optionally with a query string.
    pub url: String,
    /// HTTP method.
    pub method: String,
}

impl Api {
    pub fn new(url: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: method.into(),
        }
    }
}

/// The decision for one API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub allowed: bool,
    pub reason: String,
}

impl From<Decision> for ReviewResult {
    fn from(decision: Decision) -> Self {
        Self {
            allowed: decision.allowed,
            reason: decision.reason,
        }
    }
}

/// Results keyed by URL, then by method exactly as submitted.
pub type ReviewResults = HashMap<String, HashMap<String, ReviewResult>>;

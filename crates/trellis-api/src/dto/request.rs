//! Request DTOs.

use serde::{Deserialize, Serialize};

use trellis_auth::Api;

/// Body of `POST /apis/core/v1/accessreview`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessReviewRequest {
    /// API operations to review.
    #[serde(default)]
    pub apis: Vec<Api>,
}

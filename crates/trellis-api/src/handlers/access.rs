//! Access review handler.

use axum::Json;
use axum::extract::State;
use tracing::debug;

use trellis_auth::ReviewResults;

use crate::dto::request::AccessReviewRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// POST /apis/core/v1/accessreview
pub async fn review(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<AccessReviewRequest>,
) -> Result<Json<ApiResponse<ReviewResults>>, ApiError> {
    debug!(user_id = user.id, apis = req.apis.len(), "Access review requested");
    let results = state.reviewer.review(user.identity(), &req.apis).await?;
    Ok(Json(ApiResponse::ok(results)))
}

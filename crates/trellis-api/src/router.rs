//! Route definitions for the Trellis HTTP API.

use axum::{
    Router, middleware as axum_middleware,
    routing::{get, post},
};

use crate::handlers;
use crate::middleware;
use crate::state::AppState;

/// Build the router with all routes and request logging.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(access_routes())
        .merge(health_routes())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// Access review
fn access_routes() -> Router<AppState> {
    Router::new().route(
        "/apis/core/v1/accessreview",
        post(handlers::access::review),
    )
}

/// Health check
fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(handlers::health::health))
}

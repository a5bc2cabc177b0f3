//! Application builder: wires router + middleware + state into an Axum app.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use trellis_auth::{AccessReviewer, RoleStore};
use trellis_core::config::AppConfig;
use trellis_core::config::app::CorsConfig;
use trellis_core::error::AppError;
use trellis_database::{MemberStore, ResourceStore};

use crate::middleware::cors::build_cors_layer;
use crate::router::build_router;
use crate::state::AppState;

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState, cors_config: &CorsConfig) -> Router {
    build_router(state)
        .layer(build_cors_layer(cors_config))
        .layer(TraceLayer::new_for_http())
}

/// Runs the Trellis server over the given stores until Ctrl+C.
pub async fn run_server(
    config: AppConfig,
    resources: Arc<dyn ResourceStore>,
    members: Arc<dyn MemberStore>,
) -> Result<(), AppError> {
    tracing::info!("Starting Trellis server...");

    // ── Step 1: Load roles ───────────────────────────────────────
    let roles = Arc::new(RoleStore::load(&config.rbac.role_file).await?);

    // ── Step 2: Check stored bindings against roles ──────────────
    let bound = members.bound_role_names().await?;
    roles.validate_role_names(&bound)?;
    tracing::info!(bound_roles = bound.len(), "Stored bindings reference known roles");

    // ── Step 3: Build reviewer ───────────────────────────────────
    let reviewer = Arc::new(AccessReviewer::from_config(
        &config.rbac,
        roles,
        resources,
        members,
    )?);

    // ── Step 4: Build and start HTTP server ──────────────────────
    let config = Arc::new(config);
    let app = build_app(AppState::new(config.clone(), reviewer), &config.server.cors);
    let addr = config.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}: {e}")))?;

    tracing::info!("Trellis server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal(format!("Server error: {e}")))?;

    tracing::info!("Trellis server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
}

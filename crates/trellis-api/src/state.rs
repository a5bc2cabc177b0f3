//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use trellis_auth::{AccessReviewer, JwtDecoder};
use trellis_core::config::AppConfig;

/// Application state passed to every handler via `State<AppState>`.
///
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Batch access reviewer
    pub reviewer: Arc<AccessReviewer>,
    /// Bearer token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,
    /// Process start, for uptime reporting
    pub started_at: Instant,
}

impl AppState {
    /// Creates the state from its shared parts.
    pub fn new(config: Arc<AppConfig>, reviewer: Arc<AccessReviewer>) -> Self {
        let jwt_decoder = Arc::new(JwtDecoder::new(&config.auth));
        Self {
            config,
            reviewer,
            jwt_decoder,
            started_at: Instant::now(),
        }
    }
}

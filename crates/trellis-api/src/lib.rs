//! # trellis-api
//!
//! HTTP API layer for Trellis built on Axum.
//!
//! Exposes the batch access review endpoint and a health check, with
//! bearer-token identity extraction, request logging, CORS, and error
//! mapping.

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use error::ApiError;
pub use state::AppState;

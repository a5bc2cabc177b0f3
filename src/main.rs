//! Trellis Server: hierarchical resources with role-based access review
//!
//! Main entry point that loads configuration, selects a store backend, and
//! starts the HTTP server.

use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use trellis_core::config::AppConfig;
use trellis_core::error::AppError;
use trellis_database::{DatabasePool, MemberStore, MemoryStore, PgStore, ResourceStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("TRELLIS_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);
    tracing::info!(env = %env, "Configuration loaded");

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Trellis v{}", env!("CARGO_PKG_VERSION"));

    match config.store.backend.as_str() {
        "postgres" => {
            // ── Database connection + migrations ─────────────────
            let db = DatabasePool::connect(&config.database).await?;
            if config.database.run_migrations {
                trellis_database::migration::run_migrations(db.pool()).await?;
            }
            if !db.health_check().await? {
                return Err(AppError::database("Database health check returned an unexpected value"));
            }

            let store = Arc::new(PgStore::new(db.pool().clone()));
            let result = serve(config, store.clone(), store).await;
            db.close().await;
            result
        }
        "memory" => {
            let store = match &config.store.seed_file {
                Some(path) => {
                    tracing::info!(seed_file = %path, "Seeding in-memory store");
                    MemoryStore::load_seed_file(path).await?
                }
                None => MemoryStore::new(),
            };
            let store = Arc::new(store);
            serve(config, store.clone(), store).await
        }
        other => Err(AppError::configuration(format!(
            "Unknown store backend '{other}' (expected 'postgres' or 'memory')"
        ))),
    }
}

async fn serve(
    config: AppConfig,
    resources: Arc<dyn ResourceStore>,
    members: Arc<dyn MemberStore>,
) -> Result<(), AppError> {
    trellis_api::run_server(config, resources, members).await
}

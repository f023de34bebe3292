// Library exports for the registry backend
// This file exposes modules and functions for library consumers and the integration tests

pub mod app;
pub mod app_config;
pub mod db;
pub mod handlers;
pub mod middleware;
pub mod migrations;
pub mod models;
pub mod schema;
pub mod services;
pub mod store;
pub mod utils;

use std::sync::Arc;

use axum::Router;
use thiserror::Error;
use tower_http::trace::TraceLayer;
use tracing::info;

// Re-export commonly used types
pub use app::AppState;
pub use app_config::{AppConfig, ConfigError, StoreBackend};
pub use db::DieselPool;
pub use middleware::{ResolvedSession, SESSION_COOKIE};
pub use models::{Company, CompanyStatus, SessionClaims};
pub use services::{AuthService, JwtService, TokenError};
pub use store::{CredentialStore, MemoryStore, PgStore, StoreError, TenantScope};
pub use utils::{ServiceError, ServiceResult};

// Re-export handler route builders
pub use handlers::{api_routes, auth_routes, bot_routes, employee_routes};

#[derive(Error, Debug)]
pub enum StartupError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Database error: {0}")]
    Database(#[from] db::DbError),
    #[error("Migration error: {0}")]
    Migration(#[from] migrations::MigrationError),
    #[error("Token codec error: {0}")]
    Token(#[from] TokenError),
}

/// Open the configured store and wire the shared services
pub async fn initialize_app_state(config: AppConfig) -> Result<AppState, StartupError> {
    let jwt_service = JwtService::from_app_config(&config)?;

    let store: Arc<dyn CredentialStore> = match config.store_backend {
        StoreBackend::Postgres => {
            info!("Initializing database pool...");
            let pool =
                db::create_diesel_pool(db::DieselDatabaseConfig::from(&config.database)).await?;

            if migrations::should_run_migrations(&config) {
                info!("Running embedded migrations...");
                migrations::run_all_migrations(&config).await?;
            }

            Arc::new(PgStore::new(pool))
        }
        StoreBackend::Memory => {
            info!("Using in-memory store, data is lost on restart");
            Arc::new(MemoryStore::new())
        }
    };

    Ok(AppState::new(config, store, jwt_service))
}

/// Full application router: /api routes behind session resolution, tracing and CORS
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .nest("/api", api_routes())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::session_resolver,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::dynamic_cors_middleware,
        ))
        .with_state(state)
}

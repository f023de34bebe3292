// Migration orchestrator
// Embedded in the application binary so a fresh database is usable on first start

pub mod diesel;

use crate::app_config::{AppConfig, StoreBackend};
use thiserror::Error;
use tracing::{error, info};

#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("Failed to establish sync connection: {0}")]
    Connection(String),
    #[error("Failed to run migrations: {0}")]
    Run(String),
    #[error("Migration task panicked: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Run pending schema migrations for the configured store
pub async fn run_all_migrations(config: &AppConfig) -> Result<usize, MigrationError> {
    info!(
        environment = %config.server.environment,
        "[MIGRATIONS] Starting migration process"
    );

    match diesel::run_migrations(config.database.url.clone()).await {
        Ok(0) => {
            info!("[MIGRATIONS] Schema up to date");
            Ok(0)
        }
        Ok(applied) => {
            info!(applied, "[MIGRATIONS] Applied Diesel migrations");
            Ok(applied)
        }
        Err(e) => {
            error!(error = %e, "[MIGRATIONS] Diesel migration failed");
            Err(e)
        }
    }
}

/// Migrations only apply to the PostgreSQL store and can be switched off
pub fn should_run_migrations(config: &AppConfig) -> bool {
    config.store_backend == StoreBackend::Postgres && !config.disable_embedded_migrations
}

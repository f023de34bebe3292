// Diesel migration runner for PostgreSQL
// diesel_migrations requires a sync connection, so the harness runs on the blocking pool

use crate::db::MIGRATIONS;
use diesel::Connection;
use diesel::PgConnection;
use diesel_migrations::MigrationHarness;
use tracing::debug;

use super::MigrationError;

/// Run all pending Diesel migrations, returns the number applied
pub async fn run_migrations(database_url: String) -> Result<usize, MigrationError> {
    tokio::task::spawn_blocking(move || -> Result<usize, MigrationError> {
        let mut conn = PgConnection::establish(&database_url)
            .map_err(|e| MigrationError::Connection(e.to_string()))?;

        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|e| MigrationError::Run(e.to_string()))?;

        for migration in &applied {
            debug!(%migration, "[DIESEL] Applied migration");
        }

        Ok(applied.len())
    })
    .await?
}

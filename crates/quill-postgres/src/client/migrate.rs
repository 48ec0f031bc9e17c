//! Applies the embedded migrations.

use std::time::Instant;

use diesel_async::async_connection_wrapper::AsyncConnectionWrapper;
use diesel_migrations::MigrationHarness;
use tokio::task::spawn_blocking;

use crate::{MIGRATIONS, PgClient, PgError, PgResult, TRACING_TARGET_MIGRATION};

/// Runs every pending migration and returns the versions that were applied.
///
/// Safe to call on every start: an up-to-date schema yields an empty list.
#[tracing::instrument(skip(pg), target = TRACING_TARGET_MIGRATION)]
pub async fn run_pending_migrations(pg: &PgClient) -> PgResult<Vec<String>> {
    tracing::info!(target: TRACING_TARGET_MIGRATION, "Checking for pending migrations");

    let start = Instant::now();
    let conn = pg.get_pooled_connection().await?;

    // The harness is synchronous, so it runs on the blocking pool.
    let mut conn: AsyncConnectionWrapper<_> = conn.into();
    let result = spawn_blocking(move || {
        conn.run_pending_migrations(MIGRATIONS)
            .map(|versions| versions.into_iter().map(|v| v.to_string()).collect::<Vec<_>>())
    })
    .await;

    let duration = start.elapsed();
    let versions = result
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                duration = ?duration,
                error = %err,
                "Migration task panicked"
            );
            PgError::Migration(err.into())
        })?
        .map_err(|err| {
            tracing::error!(
                target: TRACING_TARGET_MIGRATION,
                duration = ?duration,
                error = %err,
                "Database migration failed"
            );
            PgError::Migration(err)
        })?;

    if versions.is_empty() {
        tracing::info!(target: TRACING_TARGET_MIGRATION, "Database schema is up to date");
    } else {
        tracing::info!(
            target: TRACING_TARGET_MIGRATION,
            duration = ?duration,
            applied = ?versions,
            "Applied pending migrations"
        );
    }

    Ok(versions)
}

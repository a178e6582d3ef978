use anyhow::Context;
use sqlx::{migrate::Migrator, PgPool};

/// Schema steps under `migrations/`, applied in version order: `quotes`
/// references `authors`. Every step uses `IF NOT EXISTS`, so databases
/// bootstrapped before migration tracking existed are adopted as-is.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Creates any missing tables. The runner holds an advisory lock for the
/// duration, so concurrent starters apply each step once.
#[tracing::instrument(skip_all)]
pub async fn run_migrations(db: &PgPool) -> anyhow::Result<()> {
    MIGRATOR
        .run(db)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when running migrations"))
        .context("could not bring the schema up to date")?;

    Ok(())
}

use std::path::PathBuf;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::net::TcpListener;

use crate::{config::Config, migrator::run_migrations, telemetry::Telemetry, AppState};

pub struct App {
    pub listener: TcpListener,
    pub state: AppState,
    pub telemetry: Telemetry,
}

/// Loads `.env` outside production. Runs before the subscriber exists, so the
/// outcome is returned for logging later.
fn init_env() -> Option<Result<PathBuf, dotenvy::Error>> {
    if crate::config::is_production() {
        return None;
    }

    Some(dotenvy::dotenv())
}

async fn init_database(config: &Config) -> anyhow::Result<PgPool> {
    tracing::info!("initializing database connection...");
    let db = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(config.acquire_timeout)
        .connect(&config.database_url)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when connecting to the database"))
        .context("could not connect to PGURL")?;

    tracing::info!("running migrations...");
    run_migrations(&db).await?;
    tracing::info!("finished running migrations!");

    Ok(db)
}

pub async fn init() -> anyhow::Result<App> {
    let env_file = init_env();

    let telemetry = crate::telemetry::init_telemetry()?;
    tracing::info!("initializing... please wait.");

    match env_file {
        Some(Ok(path)) => tracing::info!(path = %path.display(), "loaded environment file"),
        Some(Err(e)) if e.not_found() => {}
        Some(Err(e)) => tracing::warn!(err = ?e, "an error occurred when loading .env"),
        None => tracing::info!("production environment, skipping .env"),
    }

    let config = Config::from_env()?;
    let db = init_database(&config).await?;

    let addr = config.listen_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("could not bind to {addr}"))?;

    tracing::info!(
        %addr,
        search_mode = ?config.search_mode,
        "finished initializing!"
    );

    Ok(App {
        listener,
        state: AppState::new(db, config.search_mode),
        telemetry,
    })
}

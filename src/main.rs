use queries::SearchMode;
use sqlx::PgPool;

mod authors_quotes;
mod config;
mod constants;
mod error;
mod init;
mod migrator;
mod models;
mod queries;
mod routes;
mod telemetry;
#[cfg(test)]
mod test_support;

#[derive(Clone)]
struct AppState {
    db: PgPool,
    search_mode: SearchMode,
}

impl AppState {
    fn new(db: PgPool, search_mode: SearchMode) -> Self {
        Self { db, search_mode }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(err = ?e, "an error occurred when listening for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(err = ?e, "an error occurred when listening for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received, draining connections...");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = &*constants::STARTUP_TIME;

    let init::App {
        listener,
        state,
        telemetry,
    } = init::init().await?;
    let db = state.db.clone();

    let served = axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    tracing::info!("closing database pool...");
    db.close().await;
    telemetry.shutdown();

    served?;
    Ok(())
}

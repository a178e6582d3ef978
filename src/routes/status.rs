use axum::{extract::State, Json};
use serde::Serialize;
use time::OffsetDateTime;

use crate::{
    constants::{version::get_version, STARTUP_TIME},
    error::AppError,
    queries, AppState,
};

#[derive(Debug, Serialize)]
pub struct Status {
    pub version: String,
    pub rust: String,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub uptime_secs: i64,
    pub authors: i64,
    pub quotes: i64,
}

/// get the service's status.
#[tracing::instrument(skip_all)]
pub async fn status(State(state): State<AppState>) -> Result<Json<Status>, AppError> {
    let (authors, quotes) = futures::try_join!(
        queries::count_authors(&state.db),
        queries::count_quotes(&state.db),
    )?;

    let started_at = *STARTUP_TIME;

    Ok(Json(Status {
        version: get_version(),
        rust: rustc_version_runtime::version().to_string(),
        started_at,
        uptime_secs: (OffsetDateTime::now_utc() - started_at).whole_seconds(),
        authors,
        quotes,
    }))
}

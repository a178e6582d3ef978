use axum::{
    extract::Request,
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
    Router,
};
use tracing::Instrument;

use crate::AppState;

pub mod authors;
pub mod quotes;
pub mod status;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/authors",
            get(authors::search_authors).post(authors::create_author),
        )
        .route("/authors-quotes", post(quotes::create_author_quote))
        .route("/authors/{id}/quotes", get(quotes::search_author_quotes))
        .route("/status", get(status::status))
        .layer(middleware::from_fn(trace_request))
        .with_state(state)
}

async fn trace_request(request: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
    );

    async move {
        let started = std::time::Instant::now();
        let response = next.run(request).await;

        tracing::info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "finished request"
        );

        response
    }
    .instrument(span)
    .await
}

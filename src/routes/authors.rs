use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    authors_quotes::validate_author_name,
    error::AppError,
    models::authors::{Author, NewAuthor, SearchQuery},
    queries, AppState,
};

/// `GET /authors?query=` lists authors whose name contains the substring.
#[tracing::instrument(skip(state))]
pub async fn search_authors(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> Result<Json<Vec<Author>>, AppError> {
    let authors = queries::find_authors_by_pattern(
        &state.db,
        state.search_mode,
        &queries::contains_pattern(&search.query),
    )
    .await?;

    if authors.is_empty() {
        return Err(AppError::NotFound("authors"));
    }

    Ok(Json(authors))
}

/// `POST /authors` creates a single author without a quote.
#[tracing::instrument(skip_all)]
pub async fn create_author(
    State(state): State<AppState>,
    body: Result<Json<NewAuthor>, JsonRejection>,
) -> Result<(StatusCode, Json<Author>), AppError> {
    let Json(body) = body.map_err(|e| AppError::Validation(e.body_text()))?;
    let name = validate_author_name(body.name.as_deref())?;

    let author = queries::insert_author(&state.db, name).await?;
    tracing::info!(author_id = author.id, "created author");

    Ok((StatusCode::CREATED, Json(author)))
}

//! Parameterized statements over `authors` and `quotes`.
//!
//! Every function takes any Postgres executor, so the same statement runs
//! against the pool or inside a caller's transaction.

use sqlx::PgExecutor;

use crate::{
    error::AppError,
    models::{authors::Author, quotes::Quote},
};

/// Which pattern operator the search statements use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SearchMode {
    /// `ILIKE`
    #[default]
    CaseInsensitive,
    /// `LIKE`
    CaseSensitive,
}

impl SearchMode {
    pub fn from_case_sensitive(case_sensitive: bool) -> Self {
        if case_sensitive {
            SearchMode::CaseSensitive
        } else {
            SearchMode::CaseInsensitive
        }
    }

    fn find_authors_sql(self) -> &'static str {
        match self {
            SearchMode::CaseInsensitive => {
                "SELECT id, name FROM authors WHERE name ILIKE $1 ORDER BY id;"
            }
            SearchMode::CaseSensitive => {
                "SELECT id, name FROM authors WHERE name LIKE $1 ORDER BY id;"
            }
        }
    }

    fn find_quotes_sql(self) -> &'static str {
        match self {
            SearchMode::CaseInsensitive => {
                "SELECT quote FROM quotes WHERE author_id = $1 AND quote ILIKE $2 ORDER BY id;"
            }
            SearchMode::CaseSensitive => {
                "SELECT quote FROM quotes WHERE author_id = $1 AND quote LIKE $2 ORDER BY id;"
            }
        }
    }
}

/// Wraps a raw substring so it matches anywhere in the column.
pub fn contains_pattern(substring: &str) -> String {
    format!("%{substring}%")
}

#[tracing::instrument(skip(executor))]
pub async fn find_authors_by_pattern<'e, E>(
    executor: E,
    mode: SearchMode,
    pattern: &str,
) -> Result<Vec<Author>, AppError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Author>(mode.find_authors_sql())
        .bind(pattern)
        .fetch_all(executor)
        .await
        .inspect_err(|e| {
            tracing::error!(err = ?e, pattern = %pattern, "an error occurred when fetching authors");
        })
        .map_err(AppError::database("find authors"))
}

#[tracing::instrument(skip(executor))]
pub async fn insert_author<'e, E>(executor: E, name: &str) -> Result<Author, AppError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Author>(
        r#"
            INSERT INTO
                authors (name)
            VALUES
                ($1)
            RETURNING id, name;
        "#,
    )
    .bind(name)
    .fetch_one(executor)
    .await
    .inspect_err(|e| {
        tracing::error!(err = ?e, name = %name, "an error occurred when adding author");
    })
    .map_err(AppError::database("insert author"))
}

#[tracing::instrument(skip(executor, quote))]
pub async fn insert_quote<'e, E>(executor: E, quote: &str, author_id: i32) -> Result<Quote, AppError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_as::<_, Quote>(
        r#"
            INSERT INTO
                quotes (quote, author_id)
            VALUES
                ($1, $2)
            RETURNING id, quote, author_id;
        "#,
    )
    .bind(quote)
    .bind(author_id)
    .fetch_one(executor)
    .await
    .inspect_err(|e| {
        tracing::error!(err = ?e, author_id, "an error occurred when adding quote");
    })
    .map_err(|e| {
        let is_fk_violation = e
            .as_database_error()
            .is_some_and(|db_err| db_err.is_foreign_key_violation());

        if is_fk_violation {
            AppError::ForeignKeyViolation { author_id }
        } else {
            AppError::database("insert quote")(e)
        }
    })
}

#[tracing::instrument(skip(executor))]
pub async fn find_quotes_by_author_and_pattern<'e, E>(
    executor: E,
    mode: SearchMode,
    author_id: i32,
    pattern: &str,
) -> Result<Vec<String>, AppError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, String>(mode.find_quotes_sql())
        .bind(author_id)
        .bind(pattern)
        .fetch_all(executor)
        .await
        .inspect_err(|e| {
            tracing::error!(err = ?e, author_id, pattern = %pattern, "an error occurred when fetching quotes");
        })
        .map_err(AppError::database("find quotes"))
}

#[tracing::instrument(skip(executor))]
pub async fn count_authors<'e, E>(executor: E) -> Result<i64, AppError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM authors;")
        .fetch_one(executor)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when counting authors"))
        .map_err(AppError::database("count authors"))
}

#[tracing::instrument(skip(executor))]
pub async fn count_quotes<'e, E>(executor: E) -> Result<i64, AppError>
where
    E: PgExecutor<'e>,
{
    sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM quotes;")
        .fetch_one(executor)
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when counting quotes"))
        .map_err(AppError::database("count quotes"))
}

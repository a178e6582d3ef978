use sqlx::{PgPool, Postgres, Transaction};

use crate::{
    constants::AUTHOR_NAME_MAX_LEN,
    error::AppError,
    models::quotes::{AuthorQuote, NewAuthorQuote},
    queries,
};

/// Postgres text columns cannot hold NUL, so such input is a client error.
fn reject_nul(field: &str, value: &str) -> Result<(), AppError> {
    if value.contains('\0') {
        return Err(AppError::Validation(format!(
            "{field} must not contain NUL characters"
        )));
    }

    Ok(())
}

/// Checks an author name before it reaches the database.
pub fn validate_author_name(name: Option<&str>) -> Result<&str, AppError> {
    let name = name
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .ok_or_else(|| AppError::Validation("author is required".to_string()))?;

    reject_nul("author", name)?;

    if name.chars().count() > AUTHOR_NAME_MAX_LEN {
        return Err(AppError::Validation(format!(
            "author must be at most {AUTHOR_NAME_MAX_LEN} characters"
        )));
    }

    Ok(name)
}

pub fn validate_quote(quote: Option<&str>) -> Result<&str, AppError> {
    let quote = quote
        .filter(|quote| !quote.trim().is_empty())
        .ok_or_else(|| AppError::Validation("quote is required".to_string()))?;

    reject_nul("quote", quote)?;

    Ok(quote)
}

/// Creates an author and its first quote in one transaction.
///
/// The quote references the id returned by the author insert itself, so
/// concurrent callers can never pair a quote with someone else's author. If
/// the quote insert fails the author insert is rolled back with it.
#[tracing::instrument(skip_all)]
pub async fn create_author_quote(
    db: &PgPool,
    input: &NewAuthorQuote,
) -> Result<AuthorQuote, AppError> {
    let name = validate_author_name(input.author.as_deref())?;
    let text = validate_quote(input.quote.as_deref())?;

    let mut tx = db
        .begin()
        .await
        .inspect_err(|e| tracing::error!(err = ?e, "an error occurred when opening transaction"))
        .map_err(AppError::database("begin author quote transaction"))?;

    let created = async {
        let author = queries::insert_author(&mut *tx, name).await?;
        let quote = queries::insert_quote(&mut *tx, text, author.id).await?;

        Ok::<_, AppError>(AuthorQuote { author, quote })
    }
    .await;

    let created = finish(tx, created).await?;
    tracing::info!(
        author_id = created.author.id,
        quote_id = created.quote.id,
        "created author and quote"
    );

    Ok(created)
}

/// Commits `tx` when every step succeeded, otherwise rolls it back and
/// returns the step's error.
async fn finish<T>(
    tx: Transaction<'_, Postgres>,
    result: Result<T, AppError>,
) -> Result<T, AppError> {
    match result {
        Ok(value) => {
            tx.commit()
                .await
                .inspect_err(
                    |e| tracing::error!(err = ?e, "an error occurred when committing transaction"),
                )
                .map_err(AppError::database("commit author quote transaction"))?;

            Ok(value)
        }
        Err(e) => {
            tracing::warn!(err = ?e, "rolling back author quote transaction");

            if let Err(rollback_err) = tx.rollback().await {
                tracing::error!(err = ?rollback_err, "an error occurred when rolling back transaction");
            }

            Err(e)
        }
    }
}

use serde::{Deserialize, Serialize};

use super::authors::Author;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Quote {
    pub id: i32,
    pub quote: String,
    pub author_id: i32,
}

/// Request body of `POST /authors-quotes`. Fields stay optional so a missing
/// field is reported as a validation error rather than a decoding failure.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewAuthorQuote {
    pub author: Option<String>,
    pub quote: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorQuote {
    pub author: Author,
    pub quote: Quote,
}

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct NewAuthor {
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: String,
}

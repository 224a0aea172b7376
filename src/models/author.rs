//! Author model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Author model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

/// Author with the number of books linked to it, for catalog listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct AuthorWithBookCount {
    pub id: i32,
    pub name: String,
    pub book_count: i64,
}

/// Create author request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateAuthor {
    pub name: Option<String>,
}

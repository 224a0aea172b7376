//! Genre model and related types

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Genre model from database
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// Genre with the number of books linked to it, for catalog listings
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct GenreWithBookCount {
    pub id: i32,
    pub name: String,
    pub book_count: i64,
}

/// Create genre request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateGenre {
    pub name: Option<String>,
}

//! Borrow (loan transaction) model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// Borrow model from database.
///
/// A row is created when a book is borrowed and frozen once returned; a
/// re-borrow of the same book creates a new row. Two constraints hold at
/// the storage level: a returned row is never `is_borrowed`, and at most
/// one row per book is `is_borrowed` at any time.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrow {
    pub id: i32,
    pub book_id: i32,
    pub is_borrowed: bool,
    pub borrower_name: String,
    pub borrowed_date: DateTime<Utc>,
    pub returned_date: Option<DateTime<Utc>>,
}

/// Create borrow request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBorrow {
    pub book_id: Option<i32>,
    pub borrower_name: Option<String>,
}

//! Book model and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::author::Author;
use super::borrow::Borrow;
use super::genre::Genre;

/// A book with its relations resolved: author, genres, and the full borrow
/// history. This is the unit the query pipeline (filter/sort/paginate)
/// operates on.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookSnapshot {
    pub id: i32,
    pub title: String,
    pub date_added: DateTime<Utc>,
    pub allow_borrow: bool,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub borrows: Vec<Borrow>,
}

impl BookSnapshot {
    /// The currently-active borrow row, if any. The storage-level unique
    /// constraint guarantees there is at most one.
    pub fn active_borrow(&self) -> Option<&Borrow> {
        self.borrows.iter().find(|b| b.is_borrowed)
    }
}

/// Short book representation for list responses
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookSummary {
    pub id: i32,
    pub title: String,
    pub author: Option<String>,
    pub genres: Vec<String>,
    pub borrower_name: Option<String>,
}

impl From<&BookSnapshot> for BookSummary {
    fn from(book: &BookSnapshot) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
            author: book.author.as_ref().map(|a| a.name.clone()),
            genres: book.genres.iter().map(|g| g.name.clone()).collect(),
            borrower_name: book
                .active_borrow()
                .map(|b| b.borrower_name.clone()),
        }
    }
}

/// Active-borrow information embedded in the book detail response.
/// Books without an active borrow get the explicit "not borrowed" shape.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BorrowInfo {
    pub borrower_name: Option<String>,
    pub borrowed_date: Option<DateTime<Utc>>,
    pub is_currently_borrowed: bool,
}

/// Full book representation for the detail endpoint
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct BookDetail {
    pub id: i32,
    pub title: String,
    pub date_added: DateTime<Utc>,
    pub allow_borrow: bool,
    pub author: Option<Author>,
    pub genres: Vec<Genre>,
    pub borrow: BorrowInfo,
}

impl From<BookSnapshot> for BookDetail {
    fn from(book: BookSnapshot) -> Self {
        let borrow = match book.active_borrow() {
            Some(active) => BorrowInfo {
                borrower_name: Some(active.borrower_name.clone()),
                borrowed_date: Some(active.borrowed_date),
                is_currently_borrowed: true,
            },
            None => BorrowInfo {
                borrower_name: None,
                borrowed_date: None,
                is_currently_borrowed: false,
            },
        };

        Self {
            id: book.id,
            title: book.title,
            date_added: book.date_added,
            allow_borrow: book.allow_borrow,
            author: book.author,
            genres: book.genres,
            borrow,
        }
    }
}

/// Create book request
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateBook {
    pub title: Option<String>,
    pub author_id: Option<i32>,
    pub genre_ids: Option<Vec<i32>>,
    pub allow_borrow: Option<bool>,
}

/// Partial book update. Only provided keys are changed; `author_id`
/// distinguishes "absent" (keep) from "null" (clear the author link).
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct UpdateBook {
    pub title: Option<String>,
    #[serde(default, with = "serde_with::rust::double_option")]
    pub author_id: Option<Option<i32>>,
    pub genre_ids: Option<Vec<i32>>,
    pub allow_borrow: Option<bool>,
}

impl UpdateBook {
    /// True when no field was provided at all
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.author_id.is_none()
            && self.genre_ids.is_none()
            && self.allow_borrow.is_none()
    }
}

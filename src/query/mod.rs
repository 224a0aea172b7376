//! The book query pipeline: filter, sort, paginate.
//!
//! All three stages are pure functions over a `Vec<BookSnapshot>` fetched by
//! the repository. The read path composes them in order:
//! filter → sort → paginate.

pub mod filter;
pub mod page;
pub mod sort;

pub use filter::{BookFilter, SearchScope};
pub use page::BookPage;

use std::collections::HashSet;

use crate::models::BookSnapshot;

/// Drop duplicate books, keeping the first occurrence of each id.
fn dedup_by_id(books: &mut Vec<BookSnapshot>) {
    let mut seen = HashSet::new();
    books.retain(|b| seen.insert(b.id));
}

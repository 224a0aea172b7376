//! Filtering stage of the query pipeline.
//!
//! Narrows a book collection by free-text search, author/genre membership
//! and borrowed status, in that order. Results are deduplicated by book id.

use serde::Deserialize;

use crate::models::BookSnapshot;

/// Which fields a text query is matched against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    #[default]
    All,
    Title,
    Author,
    Borrower,
}

impl SearchScope {
    /// Parse a scope name; `None` for anything outside the whitelist.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "all" => Some(SearchScope::All),
            "title" => Some(SearchScope::Title),
            "author" => Some(SearchScope::Author),
            "borrower" => Some(SearchScope::Borrower),
            _ => None,
        }
    }
}

/// Filter criteria for the book collection
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// Case-insensitive substring search; blank or whitespace-only is ignored
    pub query: Option<String>,
    pub scope: SearchScope,
    /// Author ids to keep; empty means no author restriction
    pub authors: Vec<i32>,
    /// Genre ids to keep (any overlap); empty means no restriction
    pub genres: Vec<i32>,
    /// Tri-state borrowed filter: `Some(true)` keeps books with an active
    /// borrow, `Some(false)` keeps books with none (never borrowed or
    /// returned), `None` applies no filter
    pub borrowed: Option<bool>,
}

/// Apply search and filters to the collection in place
pub fn apply(books: &mut Vec<BookSnapshot>, filter: &BookFilter) {
    // Search first
    if let Some(query) = filter
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    {
        let needle = query.to_lowercase();
        books.retain(|b| matches_search(b, &needle, filter.scope));
    }

    // Then author/genre membership
    if !filter.authors.is_empty() {
        books.retain(|b| {
            b.author
                .as_ref()
                .is_some_and(|a| filter.authors.contains(&a.id))
        });
    }

    if !filter.genres.is_empty() {
        books.retain(|b| b.genres.iter().any(|g| filter.genres.contains(&g.id)));
    }

    // Then borrowed status
    if let Some(borrowed) = filter.borrowed {
        books.retain(|b| b.active_borrow().is_some() == borrowed);
    }

    super::dedup_by_id(books);
}

fn matches_search(book: &BookSnapshot, needle: &str, scope: SearchScope) -> bool {
    let title = || book.title.to_lowercase().contains(needle);
    // Books without an author never match the author scope
    let author = || {
        book.author
            .as_ref()
            .is_some_and(|a| a.name.to_lowercase().contains(needle))
    };
    // Any historical borrower counts, not just the active one
    let borrower = || {
        book.borrows
            .iter()
            .any(|b| b.borrower_name.to_lowercase().contains(needle))
    };

    match scope {
        SearchScope::Title => title(),
        SearchScope::Author => author(),
        SearchScope::Borrower => borrower(),
        SearchScope::All => title() || author() || borrower(),
    }
}

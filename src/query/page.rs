//! Pagination stage of the query pipeline.
//!
//! Slices an ordered collection into fixed-size pages. A collection that
//! reaches the paginator without an explicit ordering gets the default
//! id-ascending order imposed before slicing, so page boundaries are
//! always deterministic.

use crate::error::{AppError, AppResult};
use crate::models::BookSnapshot;

/// Hard cap on page size, enforced at the HTTP layer
pub const MAX_PAGE_SIZE: i64 = 50;

/// One page of an ordered book collection
#[derive(Debug)]
pub struct BookPage {
    pub items: Vec<BookSnapshot>,
    pub number: i64,
    pub total_pages: i64,
    pub total_count: i64,
}

/// Slice `books` into pages of `per_page` and return page `number` (1-based).
///
/// `ordered` states whether the caller already applied an explicit order;
/// when false, id-ascending order is imposed first. An empty collection has
/// exactly one valid, empty page; any page number beyond `total_pages`
/// fails with the out-of-range error.
pub fn paginate(
    mut books: Vec<BookSnapshot>,
    number: i64,
    per_page: i64,
    ordered: bool,
) -> AppResult<BookPage> {
    if number < 1 || per_page < 1 {
        return Err(AppError::Validation(
            "Page number (pg_num) and page size (pg_size) must be positive integers."
                .to_string(),
        ));
    }

    if !ordered {
        books.sort_by_key(|b| b.id);
    }

    let total_count = books.len() as i64;
    let total_pages = ((total_count + per_page - 1) / per_page).max(1);

    if number > total_pages {
        return Err(AppError::PageOutOfRange(number));
    }

    let start = ((number - 1) * per_page) as usize;
    let items: Vec<BookSnapshot> = books
        .into_iter()
        .skip(start)
        .take(per_page as usize)
        .collect();

    Ok(BookPage {
        items,
        number,
        total_pages,
        total_count,
    })
}

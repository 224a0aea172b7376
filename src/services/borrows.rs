//! Borrow lifecycle service.
//!
//! A book is either Available (no active borrow row) or Borrowed (exactly
//! one active row). Borrowing moves Available → Borrowed, returning moves
//! it back; the storage constraints make the transitions race-safe.

use crate::{
    error::{AppError, AppResult},
    repository::Repository,
};

#[derive(Clone)]
pub struct BorrowsService {
    repository: Repository,
}

impl BorrowsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Borrow a book for the named borrower
    pub async fn borrow_book(
        &self,
        book_id: Option<i32>,
        borrower_name: Option<String>,
    ) -> AppResult<i32> {
        let (book_id, borrower_name) = match (book_id, borrower_name) {
            (Some(id), Some(name)) if !name.trim().is_empty() => (id, name),
            _ => {
                return Err(AppError::Validation(
                    "Missing required fields: book_id and borrower_name".to_string(),
                ))
            }
        };

        let borrow_id = self
            .repository
            .borrows
            .create(book_id, borrower_name.trim())
            .await?;

        tracing::info!(
            "Borrowed book id={} by {:?} (borrow id={})",
            book_id,
            borrower_name.trim(),
            borrow_id
        );
        Ok(borrow_id)
    }

    /// Return a borrowed book
    pub async fn return_book(&self, book_id: i32) -> AppResult<i32> {
        let borrow_id = self.repository.borrows.return_book(book_id).await?;
        tracing::info!("Returned book id={} (borrow id={})", book_id, borrow_id);
        Ok(borrow_id)
    }
}

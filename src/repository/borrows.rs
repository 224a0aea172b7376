//! Borrows repository for database operations.
//!
//! Borrow and return are the only writers of the borrows table. Both run in
//! a transaction; the partial unique index on active borrows is the source
//! of truth for the "at most one active borrow per book" invariant, so a
//! unique violation at insert time surfaces as a conflict even if the
//! advisory pre-check raced.

use chrono::Utc;
use sqlx::{Pool, Postgres, Row};

use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct BorrowsRepository {
    pool: Pool<Postgres>,
}

impl BorrowsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Borrow a book: create an active borrow row for it.
    pub async fn create(&self, book_id: i32, borrower_name: &str) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let book = sqlx::query("SELECT title, allow_borrow FROM books WHERE id = $1 FOR UPDATE")
            .bind(book_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", book_id)))?;

        let title: String = book.get("title");
        let allow_borrow: bool = book.get("allow_borrow");

        if !allow_borrow {
            return Err(AppError::Conflict(format!(
                "Book '{}' is not allowed to be borrowed",
                title
            )));
        }

        let already_borrowed: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM borrows WHERE book_id = $1 AND is_borrowed)",
        )
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await?;

        if already_borrowed {
            return Err(AppError::Conflict(format!(
                "Book '{}' is already borrowed",
                title
            )));
        }

        let insert = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO borrows (book_id, is_borrowed, borrower_name, borrowed_date)
            VALUES ($1, TRUE, $2, $3)
            RETURNING id
            "#,
        )
        .bind(book_id)
        .bind(borrower_name)
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await;

        let borrow_id = match insert {
            Ok(id) => id,
            // A concurrent borrow won the race; the unique index decides.
            Err(sqlx::Error::Database(db)) if db.is_unique_violation() => {
                return Err(AppError::Conflict(format!(
                    "Book '{}' is already borrowed",
                    title
                )));
            }
            Err(e) => return Err(e.into()),
        };

        tx.commit().await?;
        Ok(borrow_id)
    }

    /// Return a book: close its active borrow row.
    pub async fn return_book(&self, book_id: i32) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        let active = sqlx::query(
            "SELECT id, borrowed_date FROM borrows \
             WHERE book_id = $1 AND is_borrowed FOR UPDATE",
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Book is not currently borrowed".to_string()))?;

        let borrow_id: i32 = active.get("id");
        let borrowed_date: chrono::DateTime<Utc> = active.get("borrowed_date");

        let returned_date = Utc::now();
        // Clock sanity: a return must not predate its borrow
        if returned_date < borrowed_date {
            return Err(AppError::Validation(
                "Return date cannot precede the borrow date".to_string(),
            ));
        }

        sqlx::query(
            "UPDATE borrows SET is_borrowed = FALSE, returned_date = $1 WHERE id = $2",
        )
        .bind(returned_date)
        .bind(borrow_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(borrow_id)
    }
}

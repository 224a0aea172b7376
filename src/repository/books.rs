//! Books repository for database operations.
//!
//! The read path materializes `BookSnapshot`s (book + author + genres +
//! borrow history) that the query pipeline consumes. Write paths run in
//! single-request transactions so multi-field edits are all-or-nothing.

use std::collections::HashMap;

use sqlx::{Pool, Postgres, Row};

use crate::{
    error::{AppError, AppResult},
    models::{
        author::Author,
        book::{BookSnapshot, CreateBook, UpdateBook},
        borrow::Borrow,
        genre::Genre,
    },
};

#[derive(Clone)]
pub struct BooksRepository {
    pool: Pool<Postgres>,
}

impl BooksRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    // =========================================================================
    // READ
    // =========================================================================

    /// Materialize the whole catalog as snapshots, id ascending.
    pub async fn snapshot(&self) -> AppResult<Vec<BookSnapshot>> {
        let rows = sqlx::query(
            r#"
            SELECT b.id, b.title, b.date_added, b.allow_borrow,
                   a.id AS author_id, a.name AS author_name
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            ORDER BY b.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        let mut books: Vec<BookSnapshot> = Vec::with_capacity(rows.len());
        let mut index: HashMap<i32, usize> = HashMap::with_capacity(rows.len());

        for row in &rows {
            let id: i32 = row.get("id");
            let author = row
                .get::<Option<i32>, _>("author_id")
                .map(|author_id| Author {
                    id: author_id,
                    name: row.get("author_name"),
                });

            index.insert(id, books.len());
            books.push(BookSnapshot {
                id,
                title: row.get("title"),
                date_added: row.get("date_added"),
                allow_borrow: row.get("allow_borrow"),
                author,
                genres: Vec::new(),
                borrows: Vec::new(),
            });
        }

        let genre_rows = sqlx::query(
            r#"
            SELECT bg.book_id, g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            ORDER BY bg.book_id, g.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        for row in &genre_rows {
            let book_id: i32 = row.get("book_id");
            if let Some(&i) = index.get(&book_id) {
                books[i].genres.push(Genre {
                    id: row.get("id"),
                    name: row.get("name"),
                });
            }
        }

        let borrow_rows = sqlx::query_as::<_, Borrow>(
            r#"
            SELECT id, book_id, is_borrowed, borrower_name, borrowed_date, returned_date
            FROM borrows
            ORDER BY book_id, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        for borrow in borrow_rows {
            if let Some(&i) = index.get(&borrow.book_id) {
                books[i].borrows.push(borrow);
            }
        }

        Ok(books)
    }

    /// Get a single book snapshot by ID
    pub async fn get_snapshot(&self, id: i32) -> AppResult<BookSnapshot> {
        let row = sqlx::query(
            r#"
            SELECT b.id, b.title, b.date_added, b.allow_borrow,
                   a.id AS author_id, a.name AS author_name
            FROM books b
            LEFT JOIN authors a ON a.id = b.author_id
            WHERE b.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        let author = row
            .get::<Option<i32>, _>("author_id")
            .map(|author_id| Author {
                id: author_id,
                name: row.get("author_name"),
            });

        let genres = sqlx::query_as::<_, Genre>(
            r#"
            SELECT g.id, g.name
            FROM book_genres bg
            JOIN genres g ON g.id = bg.genre_id
            WHERE bg.book_id = $1
            ORDER BY g.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        let borrows = sqlx::query_as::<_, Borrow>(
            r#"
            SELECT id, book_id, is_borrowed, borrower_name, borrowed_date, returned_date
            FROM borrows
            WHERE book_id = $1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(BookSnapshot {
            id,
            title: row.get("title"),
            date_added: row.get("date_added"),
            allow_borrow: row.get("allow_borrow"),
            author,
            genres,
            borrows,
        })
    }

    // =========================================================================
    // CREATE
    // =========================================================================

    /// Create a book with optional author and genre links.
    ///
    /// Runs in one transaction: an unknown author or genre id rolls back the
    /// whole creation, never leaving a partially-created book behind.
    pub async fn create(&self, book: &CreateBook, title: &str) -> AppResult<i32> {
        let mut tx = self.pool.begin().await?;

        if let Some(author_id) = book.author_id {
            let exists: bool =
                sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
                    .bind(author_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if !exists {
                return Err(AppError::NotFound(format!(
                    "Author with id {} not found",
                    author_id
                )));
            }
        }

        let book_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO books (title, allow_borrow, author_id)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(title)
        .bind(book.allow_borrow.unwrap_or(true))
        .bind(book.author_id)
        .fetch_one(&mut *tx)
        .await?;

        if let Some(ref genre_ids) = book.genre_ids {
            for &genre_id in genre_ids {
                let exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM genres WHERE id = $1)")
                        .bind(genre_id)
                        .fetch_one(&mut *tx)
                        .await?;
                if !exists {
                    return Err(AppError::NotFound(format!(
                        "Genre with id {} not found",
                        genre_id
                    )));
                }

                sqlx::query(
                    "INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2) \
                     ON CONFLICT DO NOTHING",
                )
                .bind(book_id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(book_id)
    }

    // =========================================================================
    // UPDATE
    // =========================================================================

    /// Partially update a book. Fields are validated and applied in a fixed
    /// order (title, author, genres, allow_borrow) inside one transaction;
    /// any failure leaves the book unchanged.
    pub async fn update(&self, id: i32, update: &UpdateBook) -> AppResult<BookSnapshot> {
        let mut tx = self.pool.begin().await?;

        // Lock the book row so the allow_borrow check below serializes with
        // concurrent borrows, which take the same lock.
        sqlx::query("SELECT id FROM books WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))?;

        if let Some(ref title) = update.title {
            sqlx::query("UPDATE books SET title = $1 WHERE id = $2")
                .bind(title)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        match update.author_id {
            Some(Some(author_id)) => {
                let author_exists: bool =
                    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM authors WHERE id = $1)")
                        .bind(author_id)
                        .fetch_one(&mut *tx)
                        .await?;
                if !author_exists {
                    return Err(AppError::NotFound(format!(
                        "Author with id {} not found",
                        author_id
                    )));
                }
                sqlx::query("UPDATE books SET author_id = $1 WHERE id = $2")
                    .bind(author_id)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            // Explicit null clears the author link
            Some(None) => {
                sqlx::query("UPDATE books SET author_id = NULL WHERE id = $1")
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
            }
            None => {}
        }

        if let Some(ref genre_ids) = update.genre_ids {
            let found: Vec<i32> =
                sqlx::query_scalar("SELECT id FROM genres WHERE id = ANY($1)")
                    .bind(genre_ids)
                    .fetch_all(&mut *tx)
                    .await?;
            let missing: Vec<i32> = genre_ids
                .iter()
                .filter(|genre_id| !found.contains(genre_id))
                .copied()
                .collect();
            if !missing.is_empty() {
                return Err(AppError::NotFound(format!(
                    "Genres with the following ids not found: {:?}",
                    missing
                )));
            }

            // Replace the whole membership set; an empty list clears it
            sqlx::query("DELETE FROM book_genres WHERE book_id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
            for &genre_id in genre_ids {
                sqlx::query(
                    "INSERT INTO book_genres (book_id, genre_id) VALUES ($1, $2) \
                     ON CONFLICT DO NOTHING",
                )
                .bind(id)
                .bind(genre_id)
                .execute(&mut *tx)
                .await?;
            }
        }

        if let Some(allow_borrow) = update.allow_borrow {
            if !allow_borrow {
                // Cannot disable borrowing on a book currently out
                let active: bool = sqlx::query_scalar(
                    "SELECT EXISTS(SELECT 1 FROM borrows WHERE book_id = $1 AND is_borrowed)",
                )
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
                if active {
                    return Err(AppError::Conflict(
                        "Cannot disable borrowing: the book is currently borrowed"
                            .to_string(),
                    ));
                }
            }
            sqlx::query("UPDATE books SET allow_borrow = $1 WHERE id = $2")
                .bind(allow_borrow)
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        self.get_snapshot(id).await
    }

    // =========================================================================
    // DELETE
    // =========================================================================

    /// Delete a book and, via ON DELETE CASCADE, all its borrow rows.
    /// Returns the deleted title for the response message.
    pub async fn delete(&self, id: i32) -> AppResult<String> {
        let title: Option<String> =
            sqlx::query_scalar("DELETE FROM books WHERE id = $1 RETURNING title")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        title.ok_or_else(|| AppError::NotFound(format!("Book with id {} not found", id)))
    }
}

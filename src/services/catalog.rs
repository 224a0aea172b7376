//! Catalog management service: book CRUD and the read-path query pipeline.

use crate::{
    error::{AppError, AppResult},
    models::{
        author::{Author, AuthorWithBookCount},
        book::{BookSnapshot, CreateBook, UpdateBook},
        genre::{Genre, GenreWithBookCount},
    },
    query::{self, BookFilter, BookPage},
    repository::Repository,
};

#[derive(Clone)]
pub struct CatalogService {
    repository: Repository,
}

impl CatalogService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Run the read pipeline over the catalog: filter, sort, paginate.
    ///
    /// The sort key defaults to a no-op for unknown keys; the paginator
    /// then imposes id-ascending order so page boundaries stay stable.
    pub async fn list_books(
        &self,
        filter: BookFilter,
        sort_by: &str,
        sort_desc: bool,
        pg_num: i64,
        pg_size: i64,
    ) -> AppResult<BookPage> {
        let mut books = self.repository.books.snapshot().await?;

        query::filter::apply(&mut books, &filter);
        let ordered = query::sort::apply(&mut books, sort_by, sort_desc);
        query::page::paginate(books, pg_num, pg_size, ordered)
    }

    /// Get one book with resolved relations
    pub async fn get_book(&self, id: i32) -> AppResult<BookSnapshot> {
        self.repository.books.get_snapshot(id).await
    }

    /// Create a book. Title is required; author and genre links are
    /// validated and the creation is all-or-nothing.
    pub async fn create_book(&self, book: CreateBook) -> AppResult<i32> {
        let title = book
            .title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Validation("Title is required".to_string()))?
            .to_string();

        let book_id = self.repository.books.create(&book, &title).await?;
        tracing::info!("Created book id={} title={:?}", book_id, title);
        Ok(book_id)
    }

    /// Partially update a book; rejects an empty update
    pub async fn update_book(&self, id: i32, update: UpdateBook) -> AppResult<BookSnapshot> {
        if update.is_empty() {
            return Err(AppError::Validation(
                "Request body cannot be empty".to_string(),
            ));
        }

        self.repository.books.update(id, &update).await
    }

    /// Delete a book (cascades to its borrow rows); returns the deleted title
    pub async fn delete_book(&self, id: i32) -> AppResult<String> {
        let title = self.repository.books.delete(id).await?;
        tracing::info!("Deleted book id={} title={:?}", id, title);
        Ok(title)
    }

    /// List authors sorted by descending book count
    pub async fn list_authors(&self) -> AppResult<Vec<AuthorWithBookCount>> {
        self.repository.authors.list_by_book_count().await
    }

    /// Create an author; the name must not be blank
    pub async fn create_author(&self, name: Option<String>) -> AppResult<Author> {
        let name = name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::Validation("Name is required".to_string()))?;

        self.repository.authors.create(name).await
    }

    /// List genres sorted by descending book count
    pub async fn list_genres(&self) -> AppResult<Vec<GenreWithBookCount>> {
        self.repository.genres.list_by_book_count().await
    }

    /// Create a genre; the name must not be blank
    pub async fn create_genre(&self, name: Option<String>) -> AppResult<Genre> {
        let name = name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| AppError::Validation("Name is required".to_string()))?;

        self.repository.genres.create(name).await
    }
}

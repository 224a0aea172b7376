//! Authors repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::author::{Author, AuthorWithBookCount},
};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all authors, most-referenced first
    pub async fn list_by_book_count(&self) -> AppResult<Vec<AuthorWithBookCount>> {
        let authors = sqlx::query_as::<_, AuthorWithBookCount>(
            r#"
            SELECT a.id, a.name, COUNT(b.id) AS book_count
            FROM authors a
            LEFT JOIN books b ON b.author_id = a.id
            GROUP BY a.id, a.name
            ORDER BY book_count DESC, a.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Create a new author
    pub async fn create(&self, name: &str) -> AppResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(author)
    }
}

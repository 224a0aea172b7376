//! Genres repository for database operations

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::genre::{Genre, GenreWithBookCount},
};

#[derive(Clone)]
pub struct GenresRepository {
    pool: Pool<Postgres>,
}

impl GenresRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all genres, most-referenced first
    pub async fn list_by_book_count(&self) -> AppResult<Vec<GenreWithBookCount>> {
        let genres = sqlx::query_as::<_, GenreWithBookCount>(
            r#"
            SELECT g.id, g.name, COUNT(bg.book_id) AS book_count
            FROM genres g
            LEFT JOIN book_genres bg ON bg.genre_id = g.id
            GROUP BY g.id, g.name
            ORDER BY book_count DESC, g.id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(genres)
    }

    /// Create a new genre
    pub async fn create(&self, name: &str) -> AppResult<Genre> {
        let genre = sqlx::query_as::<_, Genre>(
            "INSERT INTO genres (name) VALUES ($1) RETURNING id, name",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await?;

        Ok(genre)
    }
}

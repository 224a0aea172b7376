//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{authors, books, borrows, genres, health};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lectern API",
        version = "1.0.0",
        description = "Library catalog REST API"
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::get_book,
        books::create_book,
        books::edit_book,
        books::delete_book,
        // Borrows
        borrows::borrow_book,
        borrows::return_book,
        // Authors
        authors::list_authors,
        authors::create_author,
        // Genres
        genres::list_genres,
        genres::create_genre,
    ),
    components(
        schemas(
            // Books
            crate::models::book::BookSummary,
            crate::models::book::BookDetail,
            crate::models::book::BorrowInfo,
            crate::models::book::CreateBook,
            crate::models::book::UpdateBook,
            books::BookListResponse,
            books::BookMutationResponse,
            // Borrows
            crate::models::borrow::CreateBorrow,
            borrows::BorrowResponse,
            // Authors
            crate::models::author::Author,
            crate::models::author::AuthorWithBookCount,
            crate::models::author::CreateAuthor,
            authors::AuthorListResponse,
            // Genres
            crate::models::genre::Genre,
            crate::models::genre::GenreWithBookCount,
            crate::models::genre::CreateGenre,
            genres::GenreListResponse,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Book catalog management"),
        (name = "borrows", description = "Borrow lifecycle"),
        (name = "authors", description = "Author management"),
        (name = "genres", description = "Genre management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/api/v1/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
}

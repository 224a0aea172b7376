//! Book catalog endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::Query;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    api::AppJson,
    error::{AppError, AppResult},
    models::book::{BookDetail, BookSummary, CreateBook, UpdateBook},
    query::{page::MAX_PAGE_SIZE, BookFilter, SearchScope},
};

/// Query parameters for the book list endpoint.
///
/// Numeric parameters arrive as strings so malformed values can be turned
/// into precise 400 responses instead of a generic rejection.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListBooksParams {
    /// Free-text search query
    pub q: Option<String>,
    /// Search scope: all, title, author or borrower
    pub search_in: Option<String>,
    /// Author ids to filter by (repeatable)
    #[serde(default)]
    pub filter_author: Vec<String>,
    /// Genre ids to filter by (repeatable)
    #[serde(default)]
    pub filter_genre: Vec<String>,
    /// Borrowed status filter: true, false or null
    pub filter_borrowed: Option<String>,
    /// Sort field key; unknown keys leave the default id order
    pub sort_by: Option<String>,
    /// Sort descending when "true"
    pub sort_desc: Option<String>,
    /// Page number, 1-based
    pub pg_num: Option<String>,
    /// Page size, capped at 50
    pub pg_size: Option<String>,
}

/// Book list response with pagination info
#[derive(Serialize, ToSchema)]
pub struct BookListResponse {
    pub books: Vec<BookSummary>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

/// Response for create/update/delete operations
#[derive(Serialize, ToSchema)]
pub struct BookMutationResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book: Option<BookDetail>,
}

fn parse_id_list(values: &[String], param: &str) -> AppResult<Vec<i32>> {
    let mut ids = Vec::new();
    for value in values {
        let value = value.trim();
        // Blank entries are treated as absent
        if value.is_empty() {
            continue;
        }
        let id = value.parse::<i32>().map_err(|_| {
            AppError::Validation(format!("Invalid value for {}: expected an integer id", param))
        })?;
        ids.push(id);
    }
    Ok(ids)
}

fn parse_positive_int(value: &Option<String>, default: i64) -> AppResult<i64> {
    match value.as_deref() {
        None => Ok(default),
        Some(s) => s.parse::<i64>().map_err(|_| {
            AppError::Validation(
                "Invalid parameters: pg_num and pg_size must be integers.".to_string(),
            )
        }),
    }
}

/// List books with filtering, sorting and pagination
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListBooksParams),
    responses(
        (status = 200, description = "Paginated book list", body = BookListResponse),
        (status = 400, description = "Invalid query parameter"),
        (status = 404, description = "Page out of range")
    )
)]
pub async fn list_books(
    State(state): State<crate::AppState>,
    Query(params): Query<ListBooksParams>,
) -> AppResult<Json<BookListResponse>> {
    let scope = match params.search_in.as_deref() {
        None => SearchScope::All,
        Some(s) => SearchScope::parse(s).ok_or_else(|| {
            AppError::Validation(
                "Invalid value for search_in parameter. Allowed values: all, title, author, borrower"
                    .to_string(),
            )
        })?,
    };

    let borrowed = match params
        .filter_borrowed
        .as_deref()
        .map(str::to_lowercase)
        .as_deref()
    {
        None | Some("null") => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(_) => {
            return Err(AppError::Validation(
                "Invalid value for filter_borrowed parameter. Allowed values: true, false, null"
                    .to_string(),
            ))
        }
    };

    let filter = BookFilter {
        query: params.q.clone(),
        scope,
        authors: parse_id_list(&params.filter_author, "filter_author")?,
        genres: parse_id_list(&params.filter_genre, "filter_genre")?,
        borrowed,
    };

    let sort_by = params.sort_by.as_deref().unwrap_or("id");
    let sort_desc = params
        .sort_desc
        .as_deref()
        .is_some_and(|v| v.eq_ignore_ascii_case("true"));

    let pg_num = parse_positive_int(&params.pg_num, 1)?;
    let pg_size = parse_positive_int(&params.pg_size, 20)?;

    if pg_num < 1 || pg_size < 1 {
        return Err(AppError::Validation(
            "Page number (pg_num) and page size (pg_size) must be positive integers."
                .to_string(),
        ));
    }
    if pg_size > MAX_PAGE_SIZE {
        return Err(AppError::Validation(format!(
            "Page size cannot exceed {}.",
            MAX_PAGE_SIZE
        )));
    }

    let page = state
        .services
        .catalog
        .list_books(filter, sort_by, sort_desc, pg_num, pg_size)
        .await?;

    Ok(Json(BookListResponse {
        books: page.items.iter().map(BookSummary::from).collect(),
        current_page: page.number,
        total_pages: page.total_pages,
        total_items: page.total_count,
    }))
}

/// Get one book with full details
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book detail", body = BookDetail),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookDetail>> {
    let book = state.services.catalog.get_book(id).await?;
    Ok(Json(BookDetail::from(book)))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = BookMutationResponse),
        (status = 400, description = "Missing title"),
        (status = 404, description = "Unknown author or genre id")
    )
)]
pub async fn create_book(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<BookMutationResponse>)> {
    let book_id = state.services.catalog.create_book(request).await?;

    Ok((
        StatusCode::CREATED,
        Json(BookMutationResponse {
            message: "Book added successfully".to_string(),
            book_id: Some(book_id),
            book: None,
        }),
    ))
}

/// Partially update a book
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = BookMutationResponse),
        (status = 400, description = "Empty or malformed body"),
        (status = 404, description = "Unknown book, author or genre id"),
        (status = 409, description = "Cannot disable borrowing on an active loan")
    )
)]
pub async fn edit_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    AppJson(request): AppJson<UpdateBook>,
) -> AppResult<Json<BookMutationResponse>> {
    let book = state.services.catalog.update_book(id, request).await?;

    Ok(Json(BookMutationResponse {
        message: "Book updated successfully".to_string(),
        book_id: None,
        book: Some(BookDetail::from(book)),
    }))
}

/// Delete a book and its borrow history
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted", body = BookMutationResponse),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<BookMutationResponse>> {
    let title = state.services.catalog.delete_book(id).await?;

    Ok(Json(BookMutationResponse {
        message: format!("Book '{}' (ID: {}) deleted successfully", title, id),
        book_id: None,
        book: None,
    }))
}

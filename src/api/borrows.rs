//! Borrow lifecycle endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{api::AppJson, error::AppResult, models::borrow::CreateBorrow};

/// Borrow/return response
#[derive(Serialize, ToSchema)]
pub struct BorrowResponse {
    pub message: String,
    pub borrow_id: i32,
}

/// Borrow a book
#[utoipa::path(
    post,
    path = "/borrows",
    tag = "borrows",
    request_body = CreateBorrow,
    responses(
        (status = 201, description = "Book borrowed", body = BorrowResponse),
        (status = 400, description = "Missing book_id or borrower_name"),
        (status = 404, description = "Book not found"),
        (status = 409, description = "Borrowing not allowed or book already borrowed")
    )
)]
pub async fn borrow_book(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<CreateBorrow>,
) -> AppResult<(StatusCode, Json<BorrowResponse>)> {
    let borrow_id = state
        .services
        .borrows
        .borrow_book(request.book_id, request.borrower_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BorrowResponse {
            message: "Book borrowed successfully".to_string(),
            borrow_id,
        }),
    ))
}

/// Return a borrowed book
#[utoipa::path(
    put,
    path = "/books/{id}/return",
    tag = "borrows",
    params(("id" = i32, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book returned", body = BorrowResponse),
        (status = 400, description = "Return date precedes borrow date"),
        (status = 404, description = "Book is not currently borrowed")
    )
)]
pub async fn return_book(
    State(state): State<crate::AppState>,
    Path(book_id): Path<i32>,
) -> AppResult<Json<BorrowResponse>> {
    let borrow_id = state.services.borrows.return_book(book_id).await?;

    Ok(Json(BorrowResponse {
        message: "Book returned successfully".to_string(),
        borrow_id,
    }))
}

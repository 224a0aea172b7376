//! Author endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    api::AppJson,
    error::AppResult,
    models::author::{Author, AuthorWithBookCount, CreateAuthor},
};

/// Author list response
#[derive(Serialize, ToSchema)]
pub struct AuthorListResponse {
    pub authors: Vec<AuthorWithBookCount>,
}

/// List authors sorted by descending book count
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    responses(
        (status = 200, description = "All authors", body = AuthorListResponse)
    )
)]
pub async fn list_authors(
    State(state): State<crate::AppState>,
) -> AppResult<Json<AuthorListResponse>> {
    let authors = state.services.catalog.list_authors().await?;
    Ok(Json(AuthorListResponse { authors }))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Missing or blank name")
    )
)]
pub async fn create_author(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.services.catalog.create_author(request.name).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

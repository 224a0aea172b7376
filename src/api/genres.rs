//! Genre endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    api::AppJson,
    error::AppResult,
    models::genre::{CreateGenre, Genre, GenreWithBookCount},
};

/// Genre list response
#[derive(Serialize, ToSchema)]
pub struct GenreListResponse {
    pub genres: Vec<GenreWithBookCount>,
}

/// List genres sorted by descending book count
#[utoipa::path(
    get,
    path = "/genres",
    tag = "genres",
    responses(
        (status = 200, description = "All genres", body = GenreListResponse)
    )
)]
pub async fn list_genres(
    State(state): State<crate::AppState>,
) -> AppResult<Json<GenreListResponse>> {
    let genres = state.services.catalog.list_genres().await?;
    Ok(Json(GenreListResponse { genres }))
}

/// Create a new genre
#[utoipa::path(
    post,
    path = "/genres",
    tag = "genres",
    request_body = CreateGenre,
    responses(
        (status = 201, description = "Genre created", body = Genre),
        (status = 400, description = "Missing or blank name")
    )
)]
pub async fn create_genre(
    State(state): State<crate::AppState>,
    AppJson(request): AppJson<CreateGenre>,
) -> AppResult<(StatusCode, Json<Genre>)> {
    let genre = state.services.catalog.create_genre(request.name).await?;
    Ok((StatusCode::CREATED, Json(genre)))
}

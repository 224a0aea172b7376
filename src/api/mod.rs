//! API handlers for Lectern REST endpoints

pub mod authors;
pub mod books;
pub mod borrows;
pub mod genres;
pub mod health;
pub mod openapi;

use axum::extract::FromRequest;

use crate::error::AppError;

/// JSON body extractor. Unlike the default `Json` rejection, a missing,
/// syntactically broken or type-mismatched body is reported as a 400
/// validation error with the parse message.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

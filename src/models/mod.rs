//! Data models for the catalog

pub mod author;
pub mod book;
pub mod borrow;
pub mod genre;

pub use author::Author;
pub use book::{BookDetail, BookSnapshot, BookSummary, CreateBook, UpdateBook};
pub use borrow::{Borrow, CreateBorrow};
pub use genre::Genre;

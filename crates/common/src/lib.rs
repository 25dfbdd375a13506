//! Shared types for the reading list API and web front end.

pub mod book;
pub mod types;

pub use book::{Book, BookUpdate, NewBook, ValidationError};
pub use types::{BookId, ParseBookIdError};

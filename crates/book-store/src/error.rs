use thiserror::Error;

use crate::BookId;

/// Errors that can occur when interacting with the book store.
#[derive(Debug, Error)]
pub enum BookStoreError {
    /// No book is stored under the given id.
    #[error("Book not found: {0}")]
    NotFound(BookId),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl BookStoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, BookStoreError::NotFound(_))
    }
}

/// Result type for book store operations.
pub type Result<T> = std::result::Result<T, BookStoreError>;

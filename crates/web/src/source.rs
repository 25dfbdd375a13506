//! Where the web pages read books from.

use async_trait::async_trait;
use book_store::{BookStore, BookStoreError};
use common::{Book, BookId};
use thiserror::Error;

/// Errors that can occur while fetching or submitting books.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The requested book does not exist.
    #[error("book not found")]
    NotFound,

    /// The HTTP exchange with the API failed.
    #[error("request to reading list API failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a status the caller did not expect.
    #[error("reading list API answered {0}")]
    UnexpectedStatus(reqwest::StatusCode),

    /// A directly attached store failed.
    #[error("book store error: {0}")]
    Store(BookStoreError),
}

impl From<BookStoreError> for SourceError {
    fn from(err: BookStoreError) -> Self {
        match err {
            BookStoreError::NotFound(_) => SourceError::NotFound,
            other => SourceError::Store(other),
        }
    }
}

/// Read access to books for the HTML views.
///
/// The deployed front end reads through the API; tests and single-process
/// setups can read a store directly via [`StoreSource`].
#[async_trait]
pub trait BookSource: Send + Sync {
    /// Every book, in the order the backend returns them.
    async fn books(&self) -> Result<Vec<Book>, SourceError>;

    /// One book; `SourceError::NotFound` when it does not exist.
    async fn book(&self, id: BookId) -> Result<Book, SourceError>;
}

/// Reads books straight from a [`BookStore`].
#[derive(Clone)]
pub struct StoreSource<S>(pub S);

#[async_trait]
impl<S: BookStore> BookSource for StoreSource<S> {
    async fn books(&self) -> Result<Vec<Book>, SourceError> {
        Ok(self.0.get_all().await?)
    }

    async fn book(&self, id: BookId) -> Result<Book, SourceError> {
        Ok(self.0.get(id).await?)
    }
}

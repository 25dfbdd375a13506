use async_trait::async_trait;

use crate::{Book, BookId, Result};

/// Core trait for book store implementations.
///
/// Each operation is atomic on its own; callers never compose several
/// operations into a transaction. All implementations must be thread-safe
/// (Send + Sync) since every request handler shares the same store.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Returns every stored book, ordered by ascending id.
    async fn get_all(&self) -> Result<Vec<Book>>;

    /// Retrieves a single book.
    ///
    /// Fails with `NotFound` when no book has this id.
    async fn get(&self, id: BookId) -> Result<Book>;

    /// Persists a new book and writes the id assigned by the store back into it.
    ///
    /// Whatever id the book carried before is ignored.
    async fn insert(&self, book: &mut Book) -> Result<()>;

    /// Replaces every field of the book identified by `book.id`.
    async fn update(&self, book: &Book) -> Result<()>;

    /// Removes a book. Deleting the same id twice reports `NotFound` the second time.
    async fn delete(&self, id: BookId) -> Result<()>;
}

/// Extension trait providing convenience methods for book stores.
#[async_trait]
pub trait BookStoreExt: BookStore {
    /// Checks whether a book with this id is stored.
    async fn exists(&self, id: BookId) -> Result<bool> {
        match self.get(id).await {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl<T: BookStore + ?Sized> BookStoreExt for T {}

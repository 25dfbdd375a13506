use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{Book, BookId, BookStore, BookStoreError, Result};

#[derive(Default)]
struct Inner {
    books: BTreeMap<BookId, Book>,
    last_id: i64,
}

/// In-memory book store implementation.
///
/// Behaves like the PostgreSQL store, including never handing out an id
/// twice, and is used by the tests and when the API runs without a database.
#[derive(Clone, Default)]
pub struct InMemoryBookStore {
    inner: Arc<RwLock<Inner>>,
}

impl InMemoryBookStore {
    /// Creates a new empty in-memory book store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of books stored.
    pub async fn len(&self) -> usize {
        self.inner.read().await.books.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.books.is_empty()
    }

    /// Removes every book. Ids already handed out stay retired.
    pub async fn clear(&self) {
        self.inner.write().await.books.clear();
    }
}

#[async_trait]
impl BookStore for InMemoryBookStore {
    async fn get_all(&self) -> Result<Vec<Book>> {
        let inner = self.inner.read().await;
        Ok(inner.books.values().cloned().collect())
    }

    async fn get(&self, id: BookId) -> Result<Book> {
        let inner = self.inner.read().await;
        inner
            .books
            .get(&id)
            .cloned()
            .ok_or(BookStoreError::NotFound(id))
    }

    async fn insert(&self, book: &mut Book) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        book.id = BookId::new(inner.last_id);
        inner.books.insert(book.id, book.clone());
        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<()> {
        let mut inner = self.inner.write().await;
        match inner.books.get_mut(&book.id) {
            Some(stored) => {
                *stored = book.clone();
                Ok(())
            }
            None => Err(BookStoreError::NotFound(book.id)),
        }
    }

    async fn delete(&self, id: BookId) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner
            .books
            .remove(&id)
            .map(|_| ())
            .ok_or(BookStoreError::NotFound(id))
    }
}

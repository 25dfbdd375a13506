pub mod error;
pub mod memory;
pub mod postgres;
pub mod store;

pub use common::{Book, BookId};
pub use error::{BookStoreError, Result};
pub use memory::InMemoryBookStore;
pub use postgres::PostgresBookStore;
pub use store::BookStore;

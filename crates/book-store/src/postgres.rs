use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgPoolOptions, postgres::PgRow};

use crate::{Book, BookId, BookStoreError, Result, store::BookStore};

const BOOK_COLUMNS: &str = "id, title, published, pages, genres, rating";

/// PostgreSQL-backed book store implementation.
#[derive(Clone)]
pub struct PostgresBookStore {
    pool: PgPool,
}

impl PostgresBookStore {
    /// Creates a new PostgreSQL book store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool for `dsn` and checks that the database answers.
    pub async fn connect(dsn: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(dsn)
            .await?;

        sqlx::query("SELECT 1").execute(&pool).await?;
        tracing::info!(max_connections, "database connection pool established");

        Ok(Self::new(pool))
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_book(row: PgRow) -> Result<Book> {
        Ok(Book {
            id: BookId::new(row.try_get("id")?),
            title: row.try_get("title")?,
            published: row.try_get("published")?,
            pages: row.try_get("pages")?,
            genres: row.try_get("genres")?,
            rating: row.try_get("rating")?,
        })
    }
}

#[async_trait]
impl BookStore for PostgresBookStore {
    async fn get_all(&self) -> Result<Vec<Book>> {
        let rows = sqlx::query(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_book).collect()
    }

    async fn get(&self, id: BookId) -> Result<Book> {
        if !id.is_valid() {
            return Err(BookStoreError::NotFound(id));
        }

        let row: Option<PgRow> =
            sqlx::query(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1"))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => Self::row_to_book(row),
            None => Err(BookStoreError::NotFound(id)),
        }
    }

    async fn insert(&self, book: &mut Book) -> Result<()> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO books (title, published, pages, genres, rating)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&book.title)
        .bind(book.published)
        .bind(book.pages)
        .bind(&book.genres)
        .bind(book.rating)
        .fetch_one(&self.pool)
        .await?;

        book.id = BookId::new(id);
        Ok(())
    }

    async fn update(&self, book: &Book) -> Result<()> {
        if !book.id.is_valid() {
            return Err(BookStoreError::NotFound(book.id));
        }

        let result = sqlx::query(
            r#"
            UPDATE books
            SET title = $1, published = $2, pages = $3, genres = $4, rating = $5
            WHERE id = $6
            "#,
        )
        .bind(&book.title)
        .bind(book.published)
        .bind(book.pages)
        .bind(&book.genres)
        .bind(book.rating)
        .bind(book.id.as_i64())
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(BookStoreError::NotFound(book.id));
        }
        Ok(())
    }

    async fn delete(&self, id: BookId) -> Result<()> {
        if !id.is_valid() {
            return Err(BookStoreError::NotFound(id));
        }

        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(BookStoreError::NotFound(id));
        }
        Ok(())
    }
}

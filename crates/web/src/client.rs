//! HTTP client for the reading list JSON API.

use std::time::Duration;

use async_trait::async_trait;
use common::{Book, BookId, NewBook};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::source::{BookSource, SourceError};

/// Timeout applied to every call the front end makes to the API.
pub const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Deserialize)]
struct BooksEnvelope {
    books: Vec<Book>,
}

#[derive(Deserialize)]
struct BookEnvelope {
    book: Book,
}

/// Client for the API's book collection endpoint (e.g. `http://localhost:4000/v1/books`).
#[derive(Debug, Clone)]
pub struct ReadinglistClient {
    endpoint: String,
    http: reqwest::Client,
}

impl ReadinglistClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder().timeout(CLIENT_TIMEOUT).build()?;
        let endpoint = endpoint.into().trim_end_matches('/').to_string();
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the collection endpoint.
    pub async fn get_all(&self) -> Result<Vec<Book>, SourceError> {
        let response = self.http.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus(status));
        }

        let envelope: BooksEnvelope = response.json().await?;
        Ok(envelope.books)
    }

    /// GET one item; a 404 from the API becomes `SourceError::NotFound`.
    pub async fn get(&self, id: BookId) -> Result<Book, SourceError> {
        let url = format!("{}/{}", self.endpoint, id);
        let response = self.http.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(SourceError::NotFound),
            status if !status.is_success() => Err(SourceError::UnexpectedStatus(status)),
            _ => {
                let envelope: BookEnvelope = response.json().await?;
                Ok(envelope.book)
            }
        }
    }

    /// POST a new book as JSON and return the book the API stored.
    pub async fn create(&self, book: &NewBook) -> Result<Book, SourceError> {
        let response = self.http.post(&self.endpoint).json(book).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::UnexpectedStatus(status));
        }

        let envelope: BookEnvelope = response.json().await?;
        Ok(envelope.book)
    }
}

#[async_trait]
impl BookSource for ReadinglistClient {
    async fn books(&self) -> Result<Vec<Book>, SourceError> {
        self.get_all().await
    }

    async fn book(&self, id: BookId) -> Result<Book, SourceError> {
        self.get(id).await
    }
}

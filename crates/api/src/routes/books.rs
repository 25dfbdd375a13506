//! Book collection and item endpoints.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::Response;
use book_store::BookStore;
use common::{BookId, BookUpdate, NewBook, ParseBookIdError};

use super::AppState;
use super::metrics::{BOOKS_CREATED, BOOKS_DELETED, BOOKS_UPDATED};
use crate::envelope::{Envelope, ReadJson, read_json, write_json};
use crate::error::ApiError;

/// GET /v1/books: List every book.
#[tracing::instrument(skip(state))]
pub async fn list<S: BookStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Response, ApiError> {
    let books = state
        .store
        .get_all()
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    write_json(StatusCode::OK, &Envelope::new("books", &books), None)
}

/// POST /v1/books: Create a book from a complete payload.
#[tracing::instrument(skip(state, input))]
pub async fn create<S: BookStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    ReadJson(input): ReadJson<NewBook>,
) -> Result<Response, ApiError> {
    let mut book = input.into_book();
    book.validate()?;

    state
        .store
        .insert(&mut book)
        .await
        .map_err(|e| ApiError::Internal(e.to_string()))?;
    metrics::counter!(BOOKS_CREATED).increment(1);
    tracing::info!(id = %book.id, "created book");

    let location = HeaderValue::from_str(&format!("v1/books/{}", book.id))
        .map_err(|e| ApiError::Internal(format!("location header: {e}")))?;
    let mut headers = HeaderMap::new();
    headers.insert(LOCATION, location);

    write_json(
        StatusCode::CREATED,
        &Envelope::new("book", &book),
        Some(headers),
    )
}

/// Item requests whose id segment is empty, such as `GET /v1/books/`.
///
/// The `{id}` segment may also span several path segments (`1/extra`); those
/// reach the item handlers and fail to parse there.
pub async fn missing_id() -> ApiError {
    ParseBookIdError(String::new()).into()
}

/// GET /v1/books/{id}: Fetch one book.
#[tracing::instrument(skip(state))]
pub async fn get<S: BookStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: BookId = id.parse()?;
    let book = state.store.get(id).await?;
    tracing::info!(%id, "fetched book");

    write_json(StatusCode::OK, &Envelope::new("book", &book), None)
}

/// PUT /v1/books/{id}: Merge the supplied fields into a stored book.
///
/// The book is loaded before the body is read, so a missing book answers 404
/// even when the payload is malformed.
#[tracing::instrument(skip(state, body))]
pub async fn update<S: BookStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    body: Body,
) -> Result<Response, ApiError> {
    let id: BookId = id.parse()?;
    let mut book = state.store.get(id).await?;

    let changes: BookUpdate = read_json(body).await?;
    changes.apply_to(&mut book);
    book.validate()?;

    state.store.update(&book).await?;
    metrics::counter!(BOOKS_UPDATED).increment(1);
    tracing::info!(%id, "updated book");

    write_json(StatusCode::OK, &Envelope::new("book", &book), None)
}

/// DELETE /v1/books/{id}: Remove a book.
#[tracing::instrument(skip(state))]
pub async fn delete<S: BookStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let id: BookId = id.parse()?;
    state.store.delete(id).await?;
    metrics::counter!(BOOKS_DELETED).increment(1);
    tracing::info!(%id, "deleted book");

    write_json(
        StatusCode::OK,
        &Envelope::new("message", "Book successfully deleted"),
        None,
    )
}

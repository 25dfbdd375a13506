//! Page handlers for the web front end.

use std::sync::Arc;

use axum::Form;
use axum::extract::rejection::{FormRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{Html, Redirect};
use common::{BookId, NewBook};
use serde::Deserialize;
use thiserror::Error;

use crate::client::ReadinglistClient;
use crate::error::WebError;
use crate::source::BookSource;
use crate::templates;

/// Shared state for the page handlers.
pub struct WebState {
    /// Where the list and detail pages read from.
    pub source: Arc<dyn BookSource>,
    /// The API that receives new books.
    pub client: ReadinglistClient,
}

#[derive(Debug, Deserialize)]
pub struct ViewParams {
    pub id: Option<String>,
}

/// Raw fields of the create form, before any parsing.
#[derive(Debug, Default, Deserialize)]
pub struct CreateBookForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub published: String,
    #[serde(default)]
    pub pages: String,
    #[serde(default)]
    pub genres: String,
    #[serde(default)]
    pub rating: String,
}

/// A form field that does not hold the number it should.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field {field} is not a valid number: {value:?}")]
pub struct InvalidField {
    pub field: &'static str,
    pub value: String,
}

impl CreateBookForm {
    /// Parses the numeric fields and splits the comma-separated genres.
    ///
    /// Numbers must be bare, so surrounding whitespace is rejected. Genre
    /// segments are trimmed and empty ones dropped, so `"a, b,"` yields
    /// `["a", "b"]` and a blank field yields no genres.
    pub fn into_new_book(self) -> Result<NewBook, InvalidField> {
        let invalid = |field: &'static str, value: &str| InvalidField {
            field,
            value: value.to_string(),
        };

        let published = self
            .published
            .parse::<i32>()
            .map_err(|_| invalid("published", &self.published))?;
        let pages = self
            .pages
            .parse::<i32>()
            .map_err(|_| invalid("pages", &self.pages))?;
        let rating = self
            .rating
            .parse::<f32>()
            .ok()
            .filter(|r| r.is_finite())
            .ok_or_else(|| invalid("rating", &self.rating))?;

        let genres = self
            .genres
            .split(',')
            .map(str::trim)
            .filter(|g| !g.is_empty())
            .map(String::from)
            .collect();

        Ok(NewBook {
            title: self.title,
            published,
            pages,
            genres,
            rating,
        })
    }
}

/// GET /: List every book.
#[tracing::instrument(skip(state))]
pub async fn home(State(state): State<Arc<WebState>>) -> Result<Html<String>, WebError> {
    let books = state
        .source
        .books()
        .await
        .map_err(|e| WebError::Internal(e.to_string()))?;

    Ok(Html(templates::home(&books)?))
}

/// GET /book/view?id=N: Show one book.
#[tracing::instrument(skip(state, params))]
pub async fn view(
    State(state): State<Arc<WebState>>,
    params: Result<Query<ViewParams>, QueryRejection>,
) -> Result<Html<String>, WebError> {
    let id: BookId = params
        .ok()
        .and_then(|Query(p)| p.id)
        .and_then(|raw| raw.parse().ok())
        .ok_or(WebError::NotFound)?;

    let book = state.source.book(id).await?;
    Ok(Html(templates::view(&book)?))
}

/// GET /book/create: The empty form.
pub async fn create_form() -> Result<Html<String>, WebError> {
    Ok(Html(templates::create_form()?))
}

/// POST /book/create: Forward the submitted book to the API.
#[tracing::instrument(skip(state, form))]
pub async fn create_submit(
    State(state): State<Arc<WebState>>,
    form: Result<Form<CreateBookForm>, FormRejection>,
) -> Result<Redirect, WebError> {
    let Form(form) = form.map_err(|e| WebError::BadRequest(e.to_string()))?;
    let new_book = form
        .into_new_book()
        .map_err(|e| WebError::BadRequest(e.to_string()))?;

    let book = state
        .client
        .create(&new_book)
        .await
        .map_err(|e| WebError::Internal(e.to_string()))?;
    tracing::info!(id = %book.id, "book submitted to API");

    Ok(Redirect::to("/"))
}

/// Fallback for a known path hit with a method it does not serve.
pub async fn method_not_allowed() -> WebError {
    WebError::MethodNotAllowed
}

/// Fallback for paths no route matches.
pub async fn not_found() -> WebError {
    WebError::NotFound
}

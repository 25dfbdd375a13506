//! Web-tier error type with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::source::SourceError;

/// Errors surfaced to the browser as a bare status page.
///
/// Internal errors are logged here with their detail; the visitor only sees
/// the generic status text.
#[derive(Debug)]
pub enum WebError {
    NotFound,
    BadRequest(String),
    MethodNotAllowed,
    Internal(String),
}

impl WebError {
    pub fn status(&self) -> StatusCode {
        match self {
            WebError::NotFound => StatusCode::NOT_FOUND,
            WebError::BadRequest(_) => StatusCode::BAD_REQUEST,
            WebError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            WebError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            WebError::BadRequest(msg) => tracing::debug!(error = %msg, "bad request"),
            WebError::Internal(msg) => tracing::error!(error = %msg, "internal server error"),
            WebError::NotFound | WebError::MethodNotAllowed => {}
        }

        let text = status.canonical_reason().unwrap_or("Unknown Error");
        (status, text).into_response()
    }
}

impl From<SourceError> for WebError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound => WebError::NotFound,
            other => WebError::Internal(other.to_string()),
        }
    }
}

impl From<std::fmt::Error> for WebError {
    fn from(err: std::fmt::Error) -> Self {
        WebError::Internal(format!("render template: {err}"))
    }
}

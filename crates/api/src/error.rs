//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use book_store::BookStoreError;
use common::{ParseBookIdError, ValidationError};

use crate::envelope::MalformedBody;

/// API-level error type that maps to HTTP responses.
///
/// Error responses carry the plain status text (`Not Found`, ...) rather than
/// a JSON envelope; the detail only goes to the log.
#[derive(Debug)]
pub enum ApiError {
    /// Malformed path parameter, request body, or field value.
    BadRequest(String),
    /// Resource not found.
    NotFound(String),
    /// The path exists but does not accept this method.
    MethodNotAllowed,
    /// Internal server error.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            ApiError::BadRequest(msg) => tracing::debug!(error = %msg, "bad request"),
            ApiError::NotFound(msg) => tracing::debug!(error = %msg, "not found"),
            ApiError::MethodNotAllowed => {}
            ApiError::Internal(msg) => tracing::error!(error = %msg, "internal server error"),
        }

        let text = status.canonical_reason().unwrap_or("Unknown Error");
        (status, text).into_response()
    }
}

impl From<BookStoreError> for ApiError {
    fn from(err: BookStoreError) -> Self {
        match err {
            BookStoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<MalformedBody> for ApiError {
    fn from(err: MalformedBody) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ParseBookIdError> for ApiError {
    fn from(err: ParseBookIdError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::BookId;

    #[test]
    fn store_not_found_maps_to_404() {
        let err = ApiError::from(BookStoreError::NotFound(BookId::new(3)));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn validation_errors_map_to_400() {
        let err = ApiError::from(ValidationError::EmptyTitle);
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn response_body_is_status_text() {
        let response = ApiError::MethodNotAllowed.into_response();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"Method Not Allowed");
    }
}

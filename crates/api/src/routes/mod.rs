//! HTTP handlers and the state they share.

pub mod books;
pub mod health;
pub mod metrics;

use book_store::BookStore;

use crate::config::Environment;
use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: BookStore> {
    pub store: S,
    pub environment: Environment,
}

/// Fallback for a known path hit with a method it does not serve.
pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

/// Fallback for paths no route matches.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("no route for path".to_string())
}

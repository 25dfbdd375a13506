//! Health check endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use book_store::BookStore;
use serde::Serialize;

use super::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub environment: &'static str,
    pub version: &'static str,
}

/// GET /healthcheck: Reports availability, environment and build version.
///
/// Compact JSON followed by a newline, unlike the enveloped book responses.
pub async fn check<S: BookStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Response, ApiError> {
    let health = HealthResponse {
        status: "available",
        environment: state.environment.as_str(),
        version: env!("CARGO_PKG_VERSION"),
    };

    let mut body = serde_json::to_vec(&health)
        .map_err(|e| ApiError::Internal(format!("encode healthcheck: {e}")))?;
    body.push(b'\n');

    let mut response = (StatusCode::OK, body).into_response();
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(response)
}

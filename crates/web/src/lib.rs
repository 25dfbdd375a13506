//! Server-rendered web front end for the reading list.
//!
//! Renders HTML pages from a [`BookSource`](source::BookSource) and forwards
//! new books to the JSON API.

pub mod client;
pub mod config;
pub mod error;
pub mod handlers;
pub mod source;
pub mod templates;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use client::ReadinglistClient;
use handlers::{WebState, method_not_allowed, not_found};
use source::BookSource;

/// Blanket limit on how long a single request may take.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates the Axum application router for the HTML pages.
pub fn create_app(state: Arc<WebState>) -> Router {
    Router::new()
        .route("/", get(handlers::home).fallback(method_not_allowed))
        .route("/book/view", get(handlers::view).fallback(method_not_allowed))
        .route(
            "/book/create",
            get(handlers::create_form)
                .post(handlers::create_submit)
                .fallback(method_not_allowed),
        )
        .with_state(state)
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(TraceLayer::new_for_http())
}

/// State for the deployed front end: pages read through the API client.
pub fn create_state(client: ReadinglistClient) -> Arc<WebState> {
    Arc::new(WebState {
        source: Arc::new(client.clone()),
        client,
    })
}

/// State with pages reading from `source` and submissions going to `client`.
pub fn create_state_with_source(
    source: Arc<dyn BookSource>,
    client: ReadinglistClient,
) -> Arc<WebState> {
    Arc::new(WebState { source, client })
}

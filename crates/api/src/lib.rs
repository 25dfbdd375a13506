//! JSON API server for the reading list.
//!
//! Serves create/read/update/delete endpoints over books, backed by any
//! [`BookStore`], with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod envelope;
pub mod error;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use book_store::BookStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use config::Environment;
use routes::{AppState, method_not_allowed, not_found};

/// Blanket limit on how long a single request may take.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: BookStore + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route(
            "/healthcheck",
            get(routes::health::check::<S>).fallback(method_not_allowed),
        )
        .route(
            "/v1/books",
            get(routes::books::list::<S>)
                .post(routes::books::create::<S>)
                .fallback(method_not_allowed),
        )
        .route(
            "/v1/books/",
            get(routes::books::missing_id)
                .put(routes::books::missing_id)
                .delete(routes::books::missing_id)
                .fallback(method_not_allowed),
        )
        .route(
            "/v1/books/{*id}",
            get(routes::books::get::<S>)
                .put(routes::books::update::<S>)
                .delete(routes::books::delete::<S>)
                .fallback(method_not_allowed),
        )
        .with_state(state)
        .merge(metrics_router)
        .fallback(not_found)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state around a store.
pub fn create_state<S: BookStore>(store: S, environment: Environment) -> Arc<AppState<S>> {
    Arc::new(AppState { store, environment })
}

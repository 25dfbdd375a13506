//! Prometheus metrics endpoint and the counters the book handlers emit.

use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use metrics_exporter_prometheus::PrometheusHandle;

pub const BOOKS_CREATED: &str = "books_created_total";
pub const BOOKS_UPDATED: &str = "books_updated_total";
pub const BOOKS_DELETED: &str = "books_deleted_total";

/// Registers help text for the book counters with the installed recorder.
pub fn describe() {
    metrics::describe_counter!(BOOKS_CREATED, "Books created through the API");
    metrics::describe_counter!(BOOKS_UPDATED, "Books updated through the API");
    metrics::describe_counter!(BOOKS_DELETED, "Books deleted through the API");
}

/// GET /metrics: Prometheus text exposition.
pub async fn get(State(handle): State<PrometheusHandle>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(CONTENT_TYPE, "text/plain; version=0.0.4; charset=utf-8")],
        handle.render(),
    )
}

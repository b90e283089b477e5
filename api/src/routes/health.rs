//! Health check endpoint.
//!
//! Reports liveness together with the metric names this build translates, so an
//! operator can confirm an agent and translator agree on naming.

use axum::{routing::get, Json, Router};
use serde::Serialize;
use shared::translate::known_metrics;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status (always "healthy" if reachable).
    pub status: &'static str,
    /// Service name.
    pub service: &'static str,
    /// Service version.
    pub version: &'static str,
    /// OTLP metric names mapped into the flat record.
    pub metrics: Vec<&'static str>,
}

/// Creates the health check routes.
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_check))
}

async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        service: "otel-translator",
        version: env!("CARGO_PKG_VERSION"),
        metrics: known_metrics().collect(),
    })
}

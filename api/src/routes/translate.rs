//! OTLP translation endpoint.
//!
//! Accepts an OTLP/JSON metrics export, translates it into a flat record and forwards
//! that record to the backend.
//!
//! # Endpoints
//!
//! - `POST /translate` - Translate and forward one OTLP metrics payload

use crate::error::RequestError;
use crate::state::AppState;
use axum::{body::Bytes, extract::State, http::StatusCode, routing::post, Router};
use shared::translate::translate_slice;

/// Body returned for a successfully translated and forwarded payload.
pub const SUCCESS_BODY: &str = "OK";

/// Creates the translation routes with application state.
pub fn translate_routes(state: AppState) -> Router {
    Router::new()
        .route("/translate", post(translate_telemetry))
        .with_state(state)
}

/// Handler for OTLP translation.
///
/// The body is decoded regardless of its declared content type. Nothing is forwarded
/// unless translation succeeds.
async fn translate_telemetry(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, &'static str), RequestError> {
    let record = translate_slice(&body)?;

    let document = record.to_json().unwrap_or_default();
    tracing::info!(
        node_id = %record.node_id,
        fields = record.field_count(),
        record = %document,
        "Forwarding flat record to backend"
    );

    state.forwarder().forward(&record).await?;

    Ok((StatusCode::OK, SUCCESS_BODY))
}

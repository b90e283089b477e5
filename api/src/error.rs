//! Request-boundary error handling.
//!
//! Every failure of the translate endpoint, whatever its kind, reaches the caller as
//! the same generic 500 response. The specific kind is only logged.

use crate::forward::ForwardError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use shared::translate::TranslationError;
use thiserror::Error;

/// Body returned for every failed translation request.
pub const FAILURE_BODY: &str = "Error during transformation";

/// Errors that can occur while handling a translation request.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The payload could not be translated.
    #[error("Translation failed: {0}")]
    Translation(#[from] TranslationError),

    /// The record was translated but could not be delivered.
    #[error("Forwarding failed: {0}")]
    Forwarding(#[from] ForwardError),
}

impl RequestError {
    /// Returns a short label for the error kind, used in logs.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Translation(TranslationError::MissingField(_)) => "missing_field",
            Self::Translation(TranslationError::MalformedPayload(_)) => "malformed_payload",
            Self::Forwarding(_) => "forwarding_failure",
        }
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, kind = self.kind(), "Translation request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_BODY).into_response()
    }
}

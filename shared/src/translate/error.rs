//! Translation errors.

use thiserror::Error;

/// Errors that can occur while translating an OTLP payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// A required structural element is absent.
    #[error("Payload missing '{0}'")]
    MissingField(&'static str),

    /// The payload could not be decoded as an OTLP metrics request.
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),
}

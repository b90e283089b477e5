//! Application state module.
//!
//! Defines the shared application state that is passed to route handlers.

use crate::config::Config;
use crate::forward::{ForwardError, Forwarder, HttpForwarder, InMemoryForwarder};
use std::sync::Arc;

/// Application state shared across all request handlers.
///
/// Holds the outbound forwarder. Nothing in here is mutated per request.
#[derive(Clone)]
pub struct AppState {
    /// Delivers translated records downstream.
    forwarder: Arc<dyn Forwarder>,
}

impl AppState {
    /// Creates a new application state with the given forwarder.
    pub fn new(forwarder: Arc<dyn Forwarder>) -> Self {
        Self { forwarder }
    }

    /// Creates a new application state forwarding over HTTP to the configured backend.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_http_forwarder(config: &Config) -> Result<Self, ForwardError> {
        let forwarder = HttpForwarder::new(config.backend_url.clone(), config.forward_timeout())?;
        Ok(Self::new(Arc::new(forwarder)))
    }

    /// Creates a new application state with an in-memory forwarder.
    ///
    /// This is useful for development and testing.
    #[must_use]
    pub fn with_in_memory_forwarder() -> Self {
        Self::new(Arc::new(InMemoryForwarder::new()))
    }

    /// Returns a reference to the forwarder.
    #[must_use]
    pub fn forwarder(&self) -> &dyn Forwarder {
        self.forwarder.as_ref()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_in_memory_forwarder()
    }
}

//! Forwarding of flat records to the backend.
//!
//! The [`Forwarder`] trait abstracts the outbound delivery so the request handler can
//! be exercised without a network. Delivery is attempted exactly once; there is no
//! retry.

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::models::FlatRecord;
use std::sync::{Arc, RwLock};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while forwarding a record.
#[derive(Debug, Error)]
pub enum ForwardError {
    /// The backend answered with a non-success status.
    #[error("Backend responded with status {status}: {body}")]
    Status {
        /// Status returned by the backend.
        status: StatusCode,
        /// Response body, possibly empty.
        body: String,
    },

    /// The request could not be delivered (connection failure, timeout, ...).
    #[error("Failed to reach backend: {0}")]
    Transport(#[from] reqwest::Error),

    /// Lock acquisition failed.
    #[error("Failed to acquire lock")]
    LockError,
}

/// Delivers flat records downstream.
#[async_trait]
pub trait Forwarder: Send + Sync {
    /// Forwards a single record.
    ///
    /// # Errors
    ///
    /// Returns an error if the record could not be delivered.
    async fn forward(&self, record: &FlatRecord) -> Result<(), ForwardError>;
}

/// Forwards records as JSON over HTTP POST.
#[derive(Debug, Clone)]
pub struct HttpForwarder {
    client: reqwest::Client,
    backend_url: String,
}

impl HttpForwarder {
    /// Creates a forwarder posting to `backend_url` with the given request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(backend_url: impl Into<String>, timeout: Duration) -> Result<Self, ForwardError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            backend_url: backend_url.into(),
        })
    }
}

#[async_trait]
impl Forwarder for HttpForwarder {
    async fn forward(&self, record: &FlatRecord) -> Result<(), ForwardError> {
        let response = self
            .client
            .post(&self.backend_url)
            .json(record)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!(%status, node_id = %record.node_id, "Record forwarded");
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(ForwardError::Status { status, body })
        }
    }
}

/// Records forwarded documents in memory.
///
/// This is useful for development and testing.
#[derive(Debug, Default)]
pub struct InMemoryForwarder {
    records: Arc<RwLock<Vec<FlatRecord>>>,
    reject: bool,
}

impl InMemoryForwarder {
    /// Creates a new forwarder that accepts every record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a forwarder that rejects every record as if the backend were unavailable.
    #[must_use]
    pub fn rejecting() -> Self {
        Self {
            records: Arc::default(),
            reject: true,
        }
    }

    /// Returns the records forwarded so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock cannot be acquired.
    pub fn records(&self) -> Result<Vec<FlatRecord>, ForwardError> {
        let records = self.records.read().map_err(|_| ForwardError::LockError)?;
        Ok(records.clone())
    }

    /// Returns the number of records forwarded so far.
    ///
    /// # Errors
    ///
    /// Returns an error if the lock cannot be acquired.
    pub fn count(&self) -> Result<usize, ForwardError> {
        let records = self.records.read().map_err(|_| ForwardError::LockError)?;
        Ok(records.len())
    }
}

#[async_trait]
impl Forwarder for InMemoryForwarder {
    async fn forward(&self, record: &FlatRecord) -> Result<(), ForwardError> {
        if self.reject {
            return Err(ForwardError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "backend unavailable".to_string(),
            });
        }

        let mut records = self.records.write().map_err(|_| ForwardError::LockError)?;
        records.push(record.clone());
        Ok(())
    }
}

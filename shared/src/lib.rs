//! OTEL Translator Shared Library
//!
//! This crate contains the OTLP/JSON payload model, the flat record model and the
//! translation core used by the OTEL translator server and CLI. It performs no I/O.
//!
//! # Modules
//!
//! - [`otlp`] - OTLP/JSON metrics payload types
//! - [`models`] - The flat record sent downstream
//! - [`translate`] - Payload to record translation
//!
//! # Example
//!
//! ```
//! use shared::models::{FlatRecord, RecordField};
//!
//! let record = FlatRecord::new("node-1").with_field(RecordField::CpuUsagePercent, "12.5");
//!
//! assert_eq!(record.get(RecordField::CpuUsagePercent), Some("12.5"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod models;
pub mod otlp;
pub mod translate;

/// Re-export common dependencies for convenience.
pub use serde;
pub use serde_json;

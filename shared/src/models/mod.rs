//! Data models for the OTEL translator.
//!
//! This module contains the flat record produced by the translator and sent downstream.

pub mod record;

pub use record::{FlatRecord, RecordField};

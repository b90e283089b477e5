//! OpenTelemetry Protocol (OTLP) support.
//!
//! This module models the JSON encoding of an OTLP metrics export request
//! (`ExportMetricsServiceRequest`), restricted to the parts the translator reads.
//!
//! # Example
//!
//! ```
//! use shared::otlp::ExportMetricsRequest;
//!
//! let body = br#"{"resourceMetrics": [{"resource": {"attributes": []}, "scopeMetrics": []}]}"#;
//! let request = ExportMetricsRequest::from_slice(body).unwrap();
//! assert_eq!(request.resource_metrics.len(), 1);
//! ```

pub mod payload;

pub use payload::{
    AnyValue, ExportMetricsRequest, Gauge, KeyValue, Metric, NumberDataPoint, Resource,
    ResourceMetrics, SampleValue, ScopeMetrics,
};

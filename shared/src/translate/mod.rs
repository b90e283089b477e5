//! Translation of OTLP metrics payloads into flat records.
//!
//! # Example
//!
//! ```
//! use shared::translate::translate_slice;
//!
//! let body = br#"{
//!     "resourceMetrics": [{
//!         "resource": {"attributes": [{"key": "host.id", "value": {"stringValue": "node-7"}}]},
//!         "scopeMetrics": [{"metrics": [
//!             {"name": "system.cpu.utilization", "gauge": {"dataPoints": [{"asDouble": 42.26}]}}
//!         ]}]
//!     }]
//! }"#;
//!
//! let record = translate_slice(body).unwrap();
//! assert_eq!(record.to_json().unwrap(), r#"{"node_id":"node-7","cpu_usage_percent":"42.3"}"#);
//! ```

mod error;
mod translator;

pub use error::TranslationError;
pub use translator::{
    known_metrics, lookup, translate, translate_slice, Buffer, Format, Target, NODE_ID_KEY,
};

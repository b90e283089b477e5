//! OTLP/JSON metrics payload types.
//!
//! Field names follow the camelCase OTLP/JSON mapping. Every list defaults to
//! empty when absent so that structural presence is checked by the translator
//! rather than during decoding. Unknown fields are ignored.

use crate::translate::TranslationError;
use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer};

/// Top-level OTLP metrics export request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetricsRequest {
    /// Metrics grouped by the resource that produced them.
    #[serde(default)]
    pub resource_metrics: Vec<ResourceMetrics>,
}

impl ExportMetricsRequest {
    /// Decodes an OTLP/JSON request body.
    ///
    /// # Errors
    ///
    /// Returns [`TranslationError::MalformedPayload`] if the body is not JSON or its
    /// shape contradicts the OTLP metrics model.
    pub fn from_slice(body: &[u8]) -> Result<Self, TranslationError> {
        serde_json::from_slice(body).map_err(|e| TranslationError::MalformedPayload(e.to_string()))
    }
}

/// Metrics produced by a single resource (host, container, ...).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceMetrics {
    /// The resource description.
    #[serde(default)]
    pub resource: Option<Resource>,
    /// Metrics grouped by instrumentation scope.
    #[serde(default)]
    pub scope_metrics: Vec<ScopeMetrics>,
}

/// Resource attributes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Resource {
    /// Attributes describing the resource, in payload order.
    #[serde(default)]
    pub attributes: Vec<KeyValue>,
}

/// A key/value attribute pair.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct KeyValue {
    /// Attribute key.
    pub key: String,
    /// Attribute value, if any.
    #[serde(default)]
    pub value: Option<AnyValue>,
}

/// An attribute value.
///
/// Only the string variant is read. Every other variant (`intValue`,
/// `boolValue`, `arrayValue`, ...) is accepted and dropped.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnyValue {
    /// String variant.
    #[serde(default)]
    pub string_value: Option<String>,
}

impl AnyValue {
    /// Returns the string variant, if this value holds one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.string_value.as_deref()
    }
}

/// Metrics emitted under a single instrumentation scope.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ScopeMetrics {
    /// The metrics in this scope.
    #[serde(default)]
    pub metrics: Vec<Metric>,
}

/// A named metric.
///
/// Only gauge data is modelled; metrics of any other kind decode with
/// `gauge: None` and contribute no data points.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Metric {
    /// Metric name, e.g. `system.cpu.utilization`.
    #[serde(default)]
    pub name: String,
    /// Gauge data, when the metric is a gauge.
    #[serde(default)]
    pub gauge: Option<Gauge>,
}

impl Metric {
    /// Returns the gauge data points of this metric (empty for non-gauges).
    #[must_use]
    pub fn data_points(&self) -> &[NumberDataPoint] {
        self.gauge.as_ref().map_or(&[], |g| g.data_points.as_slice())
    }
}

/// Gauge data.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gauge {
    /// Sampled values.
    #[serde(default)]
    pub data_points: Vec<NumberDataPoint>,
}

/// A single sampled value.
///
/// A value that cannot be read as a number decodes as `None`, so the point is
/// skipped instead of failing the whole request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberDataPoint {
    /// Integer value.
    #[serde(default, deserialize_with = "deserialize_int")]
    pub as_int: Option<i64>,
    /// Floating point value.
    #[serde(default, deserialize_with = "deserialize_double")]
    pub as_double: Option<f64>,
}

/// The numeric value carried by a data point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SampleValue {
    /// Value taken from `asInt`.
    Int(i64),
    /// Value taken from `asDouble`.
    Double(f64),
}

impl SampleValue {
    /// Returns the value as a float.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Double(d) => d,
        }
    }

    /// Returns the value truncated toward zero.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn truncated(self) -> i64 {
        match self {
            Self::Int(i) => i,
            Self::Double(d) => d.trunc() as i64,
        }
    }
}

impl NumberDataPoint {
    /// Returns the value of this data point, preferring `asInt` over `asDouble`.
    ///
    /// An `asInt` of zero is a real value and is returned as such. A NaN or
    /// infinite `asDouble` is no value.
    #[must_use]
    pub fn value(&self) -> Option<SampleValue> {
        self.as_int.map(SampleValue::Int).or_else(|| {
            self.as_double
                .filter(|d| d.is_finite())
                .map(SampleValue::Double)
        })
    }
}

/// Decodes an OTLP/JSON 64-bit integer, which may be a number, an integral
/// float or a decimal string. Anything else decodes as `None`.
fn deserialize_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum IntRepr {
        Number(i64),
        Float(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<IntRepr>::deserialize(deserializer)? {
        Some(IntRepr::Number(n)) => Some(n),
        Some(IntRepr::Float(f)) => integral(f),
        Some(IntRepr::Text(s)) => s.trim().parse().ok(),
        Some(IntRepr::Other(_)) | None => None,
    })
}

/// Decodes an OTLP/JSON double, which may be a number or one of the string
/// forms used for non-finite values. Anything else decodes as `None`.
fn deserialize_double<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum DoubleRepr {
        Number(f64),
        Text(String),
        Other(IgnoredAny),
    }

    Ok(match Option::<DoubleRepr>::deserialize(deserializer)? {
        Some(DoubleRepr::Number(n)) => Some(n),
        Some(DoubleRepr::Text(s)) => s.trim().parse().ok(),
        Some(DoubleRepr::Other(_)) | None => None,
    })
}

/// Converts a float with no fractional part that fits in an `i64`.
#[allow(clippy::cast_possible_truncation)]
fn integral(f: f64) -> Option<i64> {
    // 2^63, the first float past i64::MAX
    const BOUND: f64 = 9_223_372_036_854_775_808.0;
    (f.fract() == 0.0 && (-BOUND..BOUND).contains(&f)).then_some(f as i64)
}

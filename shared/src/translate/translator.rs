//! The translator core.
//!
//! A single pass over the first resource's first scope: each known metric name is
//! routed either to a direct record field or to one of four aggregation buffers,
//! which are reduced to arithmetic means once the pass completes.

use super::TranslationError;
use crate::models::{FlatRecord, RecordField};
use crate::otlp::{ExportMetricsRequest, KeyValue, SampleValue};

/// Resource attribute key carrying the node identifier.
pub const NODE_ID_KEY: &str = "host.id";

/// How a direct field value is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// Decimal string with exactly one fraction digit.
    OneDecimal,
    /// Integer string, truncated toward zero.
    Truncated,
}

impl Format {
    fn render(self, value: SampleValue) -> String {
        match self {
            Self::OneDecimal => one_decimal(value.as_f64()),
            Self::Truncated => value.truncated().to_string(),
        }
    }
}

/// Multi-instance metrics averaged across all of their samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Buffer {
    /// Per-GPU utilization.
    GpuUsage,
    /// Per-GPU temperature.
    GpuTemperature,
    /// Per-GPU VRAM utilization.
    GpuVram,
    /// Per-drive SSD health.
    SsdHealth,
}

impl Buffer {
    const ALL: [Self; 4] = [
        Self::GpuUsage,
        Self::GpuTemperature,
        Self::GpuVram,
        Self::SsdHealth,
    ];

    /// Returns the record field the mean of this buffer is written to.
    #[must_use]
    pub const fn field(self) -> RecordField {
        match self {
            Self::GpuUsage => RecordField::GpuUsagePercent,
            Self::GpuTemperature => RecordField::GpuTemp,
            Self::GpuVram => RecordField::GpuVramPercent,
            Self::SsdHealth => RecordField::SsdHealthPercent,
        }
    }

    const fn index(self) -> usize {
        match self {
            Self::GpuUsage => 0,
            Self::GpuTemperature => 1,
            Self::GpuVram => 2,
            Self::SsdHealth => 3,
        }
    }
}

/// Where the samples of a known metric go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// Written straight to a record field; the last sample wins.
    Field(RecordField, Format),
    /// Appended to an aggregation buffer.
    Buffer(Buffer),
}

static METRIC_TABLE: [(&str, Target); 8] = [
    (
        "system.cpu.utilization",
        Target::Field(RecordField::CpuUsagePercent, Format::OneDecimal),
    ),
    (
        "system.memory.utilization",
        Target::Field(RecordField::MemUsagePercent, Format::OneDecimal),
    ),
    (
        "system.storage.used_gb",
        Target::Field(RecordField::UsedStorageGb, Format::Truncated),
    ),
    (
        "system.harddisk.used_percent",
        Target::Field(RecordField::HarddiskUsedPercent, Format::OneDecimal),
    ),
    ("system.gpu.utilization", Target::Buffer(Buffer::GpuUsage)),
    (
        "system.gpu.temperature",
        Target::Buffer(Buffer::GpuTemperature),
    ),
    ("system.gpu.vram.utilization", Target::Buffer(Buffer::GpuVram)),
    ("system.ssd.health_percent", Target::Buffer(Buffer::SsdHealth)),
];

/// Looks up where samples of the named metric go. Unknown names yield `None`.
#[must_use]
pub fn lookup(metric_name: &str) -> Option<Target> {
    METRIC_TABLE
        .iter()
        .find(|(name, _)| *name == metric_name)
        .map(|(_, target)| *target)
}

/// Returns the metric names the translator understands, in table order.
pub fn known_metrics() -> impl Iterator<Item = &'static str> {
    METRIC_TABLE.iter().map(|(name, _)| *name)
}

/// Running samples for the aggregated metrics of one payload.
#[derive(Debug, Default)]
struct Buffers {
    samples: [Vec<f64>; 4],
}

impl Buffers {
    fn push(&mut self, buffer: Buffer, value: f64) {
        self.samples[buffer.index()].push(value);
    }

    #[allow(clippy::cast_precision_loss)]
    fn mean(&self, buffer: Buffer) -> Option<f64> {
        let samples = &self.samples[buffer.index()];
        if samples.is_empty() {
            return None;
        }
        Some(samples.iter().sum::<f64>() / samples.len() as f64)
    }
}

fn one_decimal(value: f64) -> String {
    format!("{value:.1}")
}

/// Returns the string value of the first attribute keyed `host.id`.
///
/// A non-string value counts as absent.
fn find_node_id(attributes: &[KeyValue]) -> Option<&str> {
    attributes
        .iter()
        .find(|kv| kv.key == NODE_ID_KEY)
        .and_then(|kv| kv.value.as_ref())
        .and_then(|v| v.as_str())
}

/// Translates an OTLP metrics payload into a flat record.
///
/// Only `resourceMetrics[0]` and its `scopeMetrics[0]` are read.
///
/// # Errors
///
/// Returns [`TranslationError::MissingField`] if `resourceMetrics` or `scopeMetrics`
/// is empty, or if no `host.id` attribute is present. The node identifier is checked
/// last, after all metrics have been processed.
pub fn translate(payload: &ExportMetricsRequest) -> Result<FlatRecord, TranslationError> {
    let resource_metrics = payload
        .resource_metrics
        .first()
        .ok_or(TranslationError::MissingField("resourceMetrics"))?;

    let node_id = resource_metrics
        .resource
        .as_ref()
        .and_then(|r| find_node_id(&r.attributes));

    let scope_metrics = resource_metrics
        .scope_metrics
        .first()
        .ok_or(TranslationError::MissingField("scopeMetrics"))?;

    let mut record = FlatRecord::default();
    let mut buffers = Buffers::default();

    for metric in &scope_metrics.metrics {
        let Some(target) = lookup(&metric.name) else {
            tracing::trace!(metric = %metric.name, "Ignoring unknown metric");
            continue;
        };

        for data_point in metric.data_points() {
            let Some(value) = data_point.value() else {
                tracing::debug!(metric = %metric.name, "Skipping data point without a value");
                continue;
            };

            match target {
                Target::Field(field, format) => record.set(field, format.render(value)),
                Target::Buffer(buffer) => buffers.push(buffer, value.as_f64()),
            }
        }
    }

    for buffer in Buffer::ALL {
        if let Some(mean) = buffers.mean(buffer) {
            record.set(buffer.field(), one_decimal(mean));
        }
    }

    let node_id = node_id.ok_or(TranslationError::MissingField("node_id"))?;
    record.node_id = node_id.to_string();

    Ok(record)
}

/// Decodes an OTLP/JSON body and translates it.
///
/// # Errors
///
/// Returns [`TranslationError::MalformedPayload`] if the body cannot be decoded,
/// otherwise any error of [`translate`].
pub fn translate_slice(body: &[u8]) -> Result<FlatRecord, TranslationError> {
    let payload = ExportMetricsRequest::from_slice(body)?;
    translate(&payload)
}

#[cfg(test)]
#[path = "translator_test.rs"]
mod translator_test;

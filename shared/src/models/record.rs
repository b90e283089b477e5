//! Flat record data model.
//!
//! Defines the simplified, non-nested document the translator produces from an
//! OTLP metrics payload and forwards to the backend.

use serde::{Deserialize, Serialize};

/// An optional output field of a [`FlatRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    /// Host CPU utilization, percent.
    CpuUsagePercent,
    /// Host memory utilization, percent.
    MemUsagePercent,
    /// Used storage on the root partition, whole gigabytes.
    UsedStorageGb,
    /// Used space across all mounted disks, percent.
    HarddiskUsedPercent,
    /// Mean GPU utilization, percent.
    GpuUsagePercent,
    /// Mean GPU temperature, degrees Celsius.
    GpuTemp,
    /// Mean GPU VRAM utilization, percent.
    GpuVramPercent,
    /// Mean SSD health, percent.
    SsdHealthPercent,
}

impl RecordField {
    /// All optional fields, in serialization order.
    pub const ALL: [Self; 8] = [
        Self::CpuUsagePercent,
        Self::MemUsagePercent,
        Self::UsedStorageGb,
        Self::HarddiskUsedPercent,
        Self::GpuUsagePercent,
        Self::GpuTemp,
        Self::GpuVramPercent,
        Self::SsdHealthPercent,
    ];

    /// Returns the JSON key of this field.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CpuUsagePercent => "cpu_usage_percent",
            Self::MemUsagePercent => "mem_usage_percent",
            Self::UsedStorageGb => "used_storage_gb",
            Self::HarddiskUsedPercent => "harddisk_used_percent",
            Self::GpuUsagePercent => "gpu_usage_percent",
            Self::GpuTemp => "gpu_temp",
            Self::GpuVramPercent => "gpu_vram_percent",
            Self::SsdHealthPercent => "ssd_health_percent",
        }
    }
}

impl std::fmt::Display for RecordField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The flat key/value document sent downstream.
///
/// Every value is a string. Only `node_id` is required; optional fields that were
/// never set are omitted from the serialized document.
///
/// # Example
///
/// ```
/// use shared::models::{FlatRecord, RecordField};
///
/// let record = FlatRecord::new("node-1").with_field(RecordField::GpuTemp, "61.5");
///
/// assert_eq!(record.to_json().unwrap(), r#"{"node_id":"node-1","gpu_temp":"61.5"}"#);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatRecord {
    /// Identifier of the reporting host (`host.id` resource attribute).
    pub node_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    cpu_usage_percent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    mem_usage_percent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    used_storage_gb: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    harddisk_used_percent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    gpu_usage_percent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    gpu_temp: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    gpu_vram_percent: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    ssd_health_percent: Option<String>,
}

impl FlatRecord {
    /// Creates a record carrying only a node identifier.
    #[must_use]
    pub fn new(node_id: impl Into<String>) -> Self {
        Self {
            node_id: node_id.into(),
            ..Self::default()
        }
    }

    /// Sets an optional field, replacing any previous value.
    pub fn set(&mut self, field: RecordField, value: impl Into<String>) {
        *self.slot_mut(field) = Some(value.into());
    }

    /// Sets an optional field and returns the record.
    #[must_use]
    pub fn with_field(mut self, field: RecordField, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Returns the value of an optional field, if set.
    #[must_use]
    pub fn get(&self, field: RecordField) -> Option<&str> {
        let slot = match field {
            RecordField::CpuUsagePercent => &self.cpu_usage_percent,
            RecordField::MemUsagePercent => &self.mem_usage_percent,
            RecordField::UsedStorageGb => &self.used_storage_gb,
            RecordField::HarddiskUsedPercent => &self.harddisk_used_percent,
            RecordField::GpuUsagePercent => &self.gpu_usage_percent,
            RecordField::GpuTemp => &self.gpu_temp,
            RecordField::GpuVramPercent => &self.gpu_vram_percent,
            RecordField::SsdHealthPercent => &self.ssd_health_percent,
        };
        slot.as_deref()
    }

    /// Returns the number of optional fields that are set.
    #[must_use]
    pub fn field_count(&self) -> usize {
        RecordField::ALL
            .iter()
            .filter(|field| self.get(**field).is_some())
            .count()
    }

    /// Serializes the record to its flat JSON form.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    fn slot_mut(&mut self, field: RecordField) -> &mut Option<String> {
        match field {
            RecordField::CpuUsagePercent => &mut self.cpu_usage_percent,
            RecordField::MemUsagePercent => &mut self.mem_usage_percent,
            RecordField::UsedStorageGb => &mut self.used_storage_gb,
            RecordField::HarddiskUsedPercent => &mut self.harddisk_used_percent,
            RecordField::GpuUsagePercent => &mut self.gpu_usage_percent,
            RecordField::GpuTemp => &mut self.gpu_temp,
            RecordField::GpuVramPercent => &mut self.gpu_vram_percent,
            RecordField::SsdHealthPercent => &mut self.ssd_health_percent,
        }
    }
}

use serde::{Deserialize, Serialize};

/// Metrics report returned by `GET /metrics/compiled-metrics`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Echo of the requested instance identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instance_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metrics: Option<MetricSeriesSet>,
}

/// The four telemetry series the backend compiles for an instance
///
/// A series may be missing or `null`; both read as empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricSeriesSet {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu_utilization: Option<Vec<Sample>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory_utilization: Option<Vec<Sample>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_in: Option<Vec<Sample>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_out: Option<Vec<Sample>>,
}

/// A single time-stamped sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub time: String,
    pub value: f64,
}

/// Identifies one of the four fixed series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    CpuUtilization,
    MemoryUtilization,
    NetworkIn,
    NetworkOut,
}

impl MetricKind {
    /// All kinds, in display order
    pub const ALL: [MetricKind; 4] = [
        MetricKind::CpuUtilization,
        MetricKind::MemoryUtilization,
        MetricKind::NetworkIn,
        MetricKind::NetworkOut,
    ];

    /// Key used by the backend
    pub fn key(&self) -> &'static str {
        match self {
            Self::CpuUtilization => "cpu_utilization",
            Self::MemoryUtilization => "memory_utilization",
            Self::NetworkIn => "network_in",
            Self::NetworkOut => "network_out",
        }
    }
}

impl MetricSeriesSet {
    pub fn series(&self, kind: MetricKind) -> &[Sample] {
        let series = match kind {
            MetricKind::CpuUtilization => &self.cpu_utilization,
            MetricKind::MemoryUtilization => &self.memory_utilization,
            MetricKind::NetworkIn => &self.network_in,
            MetricKind::NetworkOut => &self.network_out,
        };
        series.as_deref().unwrap_or(&[])
    }
}

impl MetricsReport {
    /// Samples for `kind`, empty when the response omitted them
    pub fn series(&self, kind: MetricKind) -> &[Sample] {
        self.metrics
            .as_ref()
            .map(|m| m.series(kind))
            .unwrap_or(&[])
    }
}

//! Series transformation and chart configuration
//!
//! Turns the samples of a [`MetricsReport`] into per-series chart
//! configurations: parallel category (time) and value arrays plus the
//! titles the renderer needs. Both the terminal dashboard and the JSON
//! output of the `metrics` command consume these.

use serde::Serialize;

use crate::models::{MetricKind, MetricsReport, Sample};

/// Decimal places kept for displayed values
pub const VALUE_PRECISION: usize = 3;

/// X-axis title shared by every metrics chart
pub const TIME_AXIS_TITLE: &str = "Time (UTC)";

/// Parallel x/y sequences for one series
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesAxes {
    pub x: Vec<String>,
    pub y: Vec<f64>,
}

impl SeriesAxes {
    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// Split samples into timestamps and rounded values, preserving order
pub fn transform_series(samples: &[Sample]) -> SeriesAxes {
    let (x, y) = samples
        .iter()
        .map(|s| (s.time.clone(), round_value(s.value)))
        .unzip();
    SeriesAxes { x, y }
}

/// Round to [`VALUE_PRECISION`] decimals, ties away from zero
///
/// Goes through the decimal representation so that e.g. `12.3456`
/// becomes exactly the float parsed from `"12.346"`. Rounding works on
/// the exact binary value: `1.0005` is stored just below the tie and
/// rounds down, while `0.0625` is an exact tie and rounds to `0.063`.
pub fn round_value(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let rounded = if is_exact_tie(value) {
        // value = j / 16 with j odd, so |value| * 1000 = 125 * |j| / 2
        let sixteenths = (value.abs() * 16.0) as u64;
        let thousandths = (sixteenths * 125 + 1) / 2;
        let sign = if value < 0.0 { "-" } else { "" };
        format!("{}{}.{:03}", sign, thousandths / 1000, thousandths % 1000)
    } else {
        format!("{:.*}", VALUE_PRECISION, value)
    };
    rounded.parse().unwrap_or(value)
}

/// Above this every `value * 16` is an even integer, so no ties exist
const TIE_LIMIT: f64 = 1e15;

/// True when `value` lies exactly half-way between two thousandths
///
/// A tie is `(2k + 1) / 2000`. Binary floats can only hold it when 125
/// divides `2k + 1`, which leaves exactly the odd multiples of 1/16.
fn is_exact_tie(value: f64) -> bool {
    if value.abs() >= TIE_LIMIT {
        return false;
    }
    let sixteenths = value * 16.0;
    sixteenths.fract() == 0.0 && sixteenths.rem_euclid(2.0) == 1.0
}

/// Static presentation attributes of one series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartStyle {
    pub title: &'static str,
    pub y_axis_title: &'static str,
    pub series_name: &'static str,
}

pub fn chart_style(kind: MetricKind) -> ChartStyle {
    match kind {
        MetricKind::CpuUtilization => ChartStyle {
            title: "CPU Utilization (%)",
            y_axis_title: "Percent",
            series_name: "CPU Utilization",
        },
        MetricKind::MemoryUtilization => ChartStyle {
            title: "Memory Utilization (%)",
            y_axis_title: "Percent",
            series_name: "Memory Utilization",
        },
        MetricKind::NetworkIn => ChartStyle {
            title: "Network IN (Bytes)",
            y_axis_title: "Bytes",
            series_name: "Network IN",
        },
        MetricKind::NetworkOut => ChartStyle {
            title: "Network OUT (Bytes)",
            y_axis_title: "Bytes",
            series_name: "Network OUT",
        },
    }
}

/// A named data series as handed to a line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSeries {
    pub name: String,
    pub data: Vec<f64>,
}

/// Everything needed to draw one line chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub kind: MetricKind,
    pub title: String,
    pub x_axis_title: String,
    pub y_axis_title: String,
    /// X-axis categories (sample timestamps)
    pub categories: Vec<String>,
    pub stroke_width: u16,
    pub series: Vec<ChartSeries>,
}

impl ChartConfig {
    pub fn new(kind: MetricKind, axes: SeriesAxes) -> Self {
        let style = chart_style(kind);
        Self {
            kind,
            title: style.title.to_string(),
            x_axis_title: TIME_AXIS_TITLE.to_string(),
            y_axis_title: style.y_axis_title.to_string(),
            categories: axes.x,
            stroke_width: 1,
            series: vec![ChartSeries {
                name: style.series_name.to_string(),
                data: axes.y,
            }],
        }
    }

    /// Values of the single data series
    pub fn values(&self) -> &[f64] {
        self.series
            .first()
            .map(|s| s.data.as_slice())
            .unwrap_or(&[])
    }

    /// (category, value) pairs in order
    pub fn points(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.values().iter().copied())
    }
}

/// Build the four chart configurations, one per series, in display order
pub fn build_chart_configs(report: &MetricsReport) -> Vec<ChartConfig> {
    MetricKind::ALL
        .iter()
        .map(|&kind| ChartConfig::new(kind, transform_series(report.series(kind))))
        .collect()
}

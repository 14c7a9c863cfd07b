//! Wire models for the cost and metrics endpoints

pub mod cost;
pub mod metrics;

pub use cost::{CostBreakdown, CostReport, CostValue};
pub use metrics::{MetricKind, MetricSeriesSet, MetricsReport, Sample};

use serde::{Deserialize, Serialize};

/// Response of the backend root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WelcomeMessage {
    pub message: String,
}

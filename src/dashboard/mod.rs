//! Terminal dashboard
//!
//! The dashboard composes a static navbar with two independent forms:
//! the cost calculator and the metrics chart. Each form owns its own
//! transient state; they never share data. Requests run on spawned tasks
//! and come back as [`DashboardEvent`]s, applied in arrival order.

pub mod app;
pub mod cost_calculator;
pub mod dispatch;
pub mod metrics_chart;
pub mod navbar;
pub mod widgets;

// Re-export commonly used types
pub use app::{Action, Dashboard, Focus};
pub use cost_calculator::CostCalculator;
pub use dispatch::{ApiRequest, DashboardEvent, Dispatcher};
pub use metrics_chart::MetricsChart;

/// Outcome of submitting a form
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<Q> {
    /// Input accepted; send this query
    Send(Q),
    /// Input rejected before any request; show this alert
    Rejected(&'static str),
}

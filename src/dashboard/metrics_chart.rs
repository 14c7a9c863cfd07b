//! Metrics chart form
//!
//! One instance-id input. A successful lookup is turned into four chart
//! configurations and drawn as a 2x2 grid of line charts.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};
use tracing::{info, warn};

use crate::charts::{build_chart_configs, ChartConfig};
use crate::client::MetricsQuery;
use crate::dashboard::widgets::{render_input, render_status};
use crate::dashboard::Submission;
use crate::error::ApiError;
use crate::models::MetricsReport;

pub const MISSING_INPUT_ALERT: &str = "Please enter an Instance ID.";
pub const FETCH_FAILED_ALERT: &str = "Failed to fetch metrics. Please try again.";

const MAX_CATEGORY_LABEL: usize = 19;

/// State of the metrics form
#[derive(Debug, Default)]
pub struct MetricsChart {
    pub instance_id: String,
    in_flight: usize,
    show_charts: bool,
    /// Instance the visible charts belong to
    shown_instance: Option<String>,
    charts: Vec<ChartConfig>,
}

impl MetricsChart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self) -> Submission<MetricsQuery> {
        self.show_charts = false;

        if self.instance_id.is_empty() {
            info!("Metrics submission rejected: missing instance id");
            return Submission::Rejected(MISSING_INPUT_ALERT);
        }

        self.in_flight += 1;
        Submission::Send(MetricsQuery {
            instance_id: self.instance_id.clone(),
        })
    }

    /// Apply the outcome of the request for `query`; returns an alert on
    /// failure
    pub fn resolve(
        &mut self,
        query: MetricsQuery,
        result: Result<MetricsReport, ApiError>,
    ) -> Option<&'static str> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(report) => {
                self.charts = build_chart_configs(&report);
                self.shown_instance = Some(query.instance_id);
                self.show_charts = true;
                None
            }
            Err(e) => {
                warn!(
                    instance_id = %query.instance_id,
                    error = %e,
                    kind = e.kind(),
                    "Failed to fetch metrics"
                );
                self.show_charts = false;
                Some(FETCH_FAILED_ALERT)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Visible charts, empty while hidden
    pub fn charts(&self) -> &[ChartConfig] {
        if self.show_charts {
            &self.charts
        } else {
            &[]
        }
    }

    pub fn shown_instance(&self) -> Option<&str> {
        if self.show_charts {
            self.shown_instance.as_deref()
        } else {
            None
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focused: bool, tick: u64) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Metrics for the particular Instances");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Instance id
                Constraint::Length(1), // Loader or header
                Constraint::Min(0),    // Charts
            ])
            .split(inner);

        render_input(f, chunks[0], "Enter Instance ID", &self.instance_id, focused);

        if let Some(instance) = self.shown_instance() {
            let header = Line::from(vec![
                Span::raw("AWS Live Metrics for Instance: "),
                Span::styled(
                    instance.to_string(),
                    Style::default()
                        .fg(Color::Blue)
                        .add_modifier(Modifier::BOLD),
                ),
            ]);
            f.render_widget(Paragraph::new(header), chunks[1]);
        } else {
            render_status(f, chunks[1], self.is_loading(), tick);
        }

        let charts = self.charts();
        if charts.is_empty() {
            return;
        }

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(chunks[2]);
        let mut cells = Vec::with_capacity(4);
        for row in rows.iter() {
            let cols = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
                .split(*row);
            cells.extend(cols.iter().copied());
        }

        for (chart, cell) in charts.iter().zip(cells) {
            render_chart(f, cell, chart);
        }
    }
}

fn render_chart(f: &mut Frame, area: Rect, config: &ChartConfig) {
    let points: Vec<(f64, f64)> = config
        .values()
        .iter()
        .enumerate()
        .map(|(i, v)| (i as f64, *v))
        .collect();
    let [y_min, y_max] = value_bounds(config.values());
    let x_max = points.len().saturating_sub(1).max(1) as f64;

    let series_name = config
        .series
        .first()
        .map(|s| s.name.clone())
        .unwrap_or_default();
    let datasets = vec![Dataset::default()
        .name(series_name)
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points)];

    let chart = Chart::new(datasets)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(
                    config.title.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
        )
        .x_axis(
            Axis::default()
                .title(config.x_axis_title.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, x_max])
                .labels(category_labels(&config.categories)),
        )
        .y_axis(
            Axis::default()
                .title(config.y_axis_title.clone())
                .style(Style::default().fg(Color::Gray))
                .bounds([y_min, y_max])
                .labels(vec![
                    Span::raw(format_axis_value(y_min)),
                    Span::raw(format_axis_value((y_min + y_max) / 2.0)),
                    Span::raw(format_axis_value(y_max)),
                ]),
        );

    f.render_widget(chart, area);
}

/// First and last timestamp, shortened to fit under a chart
fn category_labels(categories: &[String]) -> Vec<Span<'static>> {
    let shorten = |s: &String| s.chars().take(MAX_CATEGORY_LABEL).collect::<String>();
    match (categories.first(), categories.last()) {
        (Some(first), Some(last)) if categories.len() > 1 => {
            vec![Span::raw(shorten(first)), Span::raw(shorten(last))]
        }
        (Some(only), _) => vec![Span::raw(shorten(only))],
        _ => vec![],
    }
}

/// Y-axis bounds with a little headroom; `[0, 1]` without finite data
pub fn value_bounds(values: &[f64]) -> [f64; 2] {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let Some(first) = finite.next() else {
        return [0.0, 1.0];
    };
    let (min, max) = finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let span = max - min;
    let pad = if span > f64::EPSILON {
        span * 0.05
    } else if min.abs() > f64::EPSILON {
        min.abs() * 0.1
    } else {
        1.0
    };
    [min - pad, max + pad]
}

fn format_axis_value(value: f64) -> String {
    if value.abs() >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value.abs() >= 1_000.0 {
        format!("{:.1}k", value / 1_000.0)
    } else {
        format!("{:.2}", value)
    }
}

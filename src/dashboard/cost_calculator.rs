//! Cost calculator form
//!
//! Two free-text inputs (expected API calls and instance capacity). A
//! submission either yields a [`CostQuery`] or is rejected before any
//! request is made.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use tracing::{info, warn};

use crate::client::CostQuery;
use crate::dashboard::widgets::{render_input, render_status};
use crate::dashboard::Submission;
use crate::error::ApiError;
use crate::models::CostReport;

pub const MISSING_INPUT_ALERT: &str = "Please enter API calls and Instance Capacity.";
pub const FETCH_FAILED_ALERT: &str = "Failed to fetch costs. Please try again.";

/// State of the cost calculator form
#[derive(Debug, Default)]
pub struct CostCalculator {
    pub users: String,
    pub instance_capacity: String,
    in_flight: usize,
    show_results: bool,
    report: Option<CostReport>,
}

impl CostCalculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the inputs and start a request
    ///
    /// Results are hidden on every attempt. The loading flag is only
    /// raised when a request is actually going out.
    pub fn submit(&mut self) -> Submission<CostQuery> {
        self.show_results = false;

        if self.users.is_empty() || self.instance_capacity.is_empty() {
            info!("Cost submission rejected: missing input");
            return Submission::Rejected(MISSING_INPUT_ALERT);
        }

        self.in_flight += 1;
        Submission::Send(CostQuery {
            users: self.users.clone(),
            instance_capacity: self.instance_capacity.clone(),
        })
    }

    /// Apply the outcome of a request; returns an alert on failure
    ///
    /// The last outcome applied wins.
    pub fn resolve(&mut self, result: Result<CostReport, ApiError>) -> Option<&'static str> {
        self.in_flight = self.in_flight.saturating_sub(1);

        match result {
            Ok(report) => {
                self.report = Some(report);
                self.show_results = true;
                None
            }
            Err(e) => {
                warn!(error = %e, kind = e.kind(), "Failed to fetch costs");
                self.show_results = false;
                Some(FETCH_FAILED_ALERT)
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// The report, only while results are visible
    pub fn results(&self) -> Option<&CostReport> {
        if self.show_results {
            self.report.as_ref()
        } else {
            None
        }
    }

    pub fn render(&self, f: &mut Frame, area: Rect, focus: Option<CostField>, tick: u64) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title("Client Cost Calculator");
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Prompt
                Constraint::Length(3), // API calls
                Constraint::Length(3), // Instance capacity
                Constraint::Length(1), // Loader
                Constraint::Min(0),    // Results
            ])
            .split(inner);

        f.render_widget(
            Paragraph::new("Enter the expected API calls and Instance capacity:")
                .style(Style::default().add_modifier(Modifier::BOLD)),
            chunks[0],
        );
        render_input(
            f,
            chunks[1],
            "API Calls",
            &self.users,
            focus == Some(CostField::Users),
        );
        render_input(
            f,
            chunks[2],
            "Instance Capacity",
            &self.instance_capacity,
            focus == Some(CostField::InstanceCapacity),
        );
        render_status(f, chunks[3], self.is_loading(), tick);

        if let Some(report) = self.results() {
            self.render_results(f, chunks[4], report);
        }
    }

    fn render_results(&self, f: &mut Frame, area: Rect, report: &CostReport) {
        let mut lines = Vec::new();
        for section in report.sections() {
            lines.push(Line::from(Span::styled(
                section.title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )));
            for line in section.lines {
                let highlight = line.label == "Company's Profit";
                let value_style = if highlight {
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {}: ", line.label),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::styled(line.value, value_style),
                ]));
            }
            lines.push(Line::from(""));
        }

        let paragraph = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(Block::default().borders(Borders::TOP));
        f.render_widget(paragraph, area);
    }
}

/// Inputs of the cost calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostField {
    Users,
    InstanceCapacity,
}

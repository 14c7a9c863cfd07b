use std::collections::VecDeque;

use chrono::{DateTime, Local};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::dashboard::cost_calculator::{CostCalculator, CostField};
use crate::dashboard::dispatch::{ApiRequest, DashboardEvent};
use crate::dashboard::metrics_chart::MetricsChart;
use crate::dashboard::{navbar, widgets, Submission};

/// Input that currently receives keystrokes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Users,
    InstanceCapacity,
    InstanceId,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Self::Users => Self::InstanceCapacity,
            Self::InstanceCapacity => Self::InstanceId,
            Self::InstanceId => Self::Users,
        }
    }

    fn previous(self) -> Self {
        match self {
            Self::Users => Self::InstanceId,
            Self::InstanceCapacity => Self::Users,
            Self::InstanceId => Self::InstanceCapacity,
        }
    }
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Submit(ApiRequest),
}

/// Application state for the dashboard
pub struct Dashboard {
    pub cost: CostCalculator,
    pub metrics: MetricsChart,
    pub focus: Focus,
    pub last_update: Option<DateTime<Local>>,
    alerts: VecDeque<String>,
    tick: u64,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    pub fn new() -> Self {
        Self {
            cost: CostCalculator::new(),
            metrics: MetricsChart::new(),
            focus: Focus::Users,
            last_update: None,
            alerts: VecDeque::new(),
            tick: 0,
        }
    }

    /// The alert currently blocking input, if any
    pub fn alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    fn push_alert(&mut self, alert: Option<&'static str>) {
        if let Some(alert) = alert {
            self.alerts.push_back(alert.to_string());
        }
    }

    /// Handle keyboard input
    ///
    /// While an alert is open it swallows everything except the keys that
    /// dismiss it and Ctrl-C.
    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.kind != KeyEventKind::Press {
            return Action::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Action::Quit;
        }

        if !self.alerts.is_empty() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                self.alerts.pop_front();
            }
            return Action::None;
        }

        match key.code {
            KeyCode::Esc => return Action::Quit,
            KeyCode::Tab | KeyCode::Down => self.focus = self.focus.next(),
            KeyCode::BackTab | KeyCode::Up => self.focus = self.focus.previous(),
            KeyCode::Enter => return self.submit_focused(),
            KeyCode::Backspace => {
                self.focused_input().pop();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.focused_input().push(c);
            }
            _ => {}
        }
        Action::None
    }

    fn focused_input(&mut self) -> &mut String {
        match self.focus {
            Focus::Users => &mut self.cost.users,
            Focus::InstanceCapacity => &mut self.cost.instance_capacity,
            Focus::InstanceId => &mut self.metrics.instance_id,
        }
    }

    fn submit_focused(&mut self) -> Action {
        let submission = match self.focus {
            Focus::Users | Focus::InstanceCapacity => match self.cost.submit() {
                Submission::Send(query) => Submission::Send(ApiRequest::Costs(query)),
                Submission::Rejected(alert) => Submission::Rejected(alert),
            },
            Focus::InstanceId => match self.metrics.submit() {
                Submission::Send(query) => Submission::Send(ApiRequest::Metrics(query)),
                Submission::Rejected(alert) => Submission::Rejected(alert),
            },
        };

        match submission {
            Submission::Send(request) => Action::Submit(request),
            Submission::Rejected(alert) => {
                self.push_alert(Some(alert));
                Action::None
            }
        }
    }

    /// Apply a completed request to the component that issued it
    pub fn apply(&mut self, event: DashboardEvent) {
        let alert = match event {
            DashboardEvent::Costs(result) => self.cost.resolve(result),
            DashboardEvent::Metrics { query, result } => self.metrics.resolve(query, result),
        };
        if alert.is_none() {
            self.last_update = Some(Local::now());
        }
        self.push_alert(alert);
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }

    /// Render the UI
    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Navbar
                Constraint::Min(10),   // Forms
            ])
            .split(f.area());

        navbar::render(f, chunks[0], self.last_update);

        let panels = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[1]);

        let cost_focus = match self.focus {
            Focus::Users => Some(CostField::Users),
            Focus::InstanceCapacity => Some(CostField::InstanceCapacity),
            Focus::InstanceId => None,
        };
        self.cost.render(f, panels[0], cost_focus, self.tick);
        self.metrics
            .render(f, panels[1], self.focus == Focus::InstanceId, self.tick);

        if let Some(alert) = self.alert() {
            widgets::render_alert(f, alert);
        }
    }
}

//! Small drawing helpers shared by the dashboard panels

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const CARET: &str = "▏";

/// Single-line text input; the placeholder shows while empty
pub fn render_input(f: &mut Frame, area: Rect, placeholder: &str, value: &str, focused: bool) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = if value.is_empty() && !focused {
        vec![Span::styled(
            placeholder.to_string(),
            Style::default().fg(Color::DarkGray),
        )]
    } else {
        vec![Span::raw(value.to_string())]
    };
    if focused {
        spans.push(Span::styled(CARET, Style::default().fg(Color::Yellow)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(placeholder.to_string()),
    );
    f.render_widget(paragraph, area);
}

/// Loading indicator line, blank when idle
pub fn render_status(f: &mut Frame, area: Rect, loading: bool, tick: u64) {
    if !loading {
        return;
    }
    let line = Line::from(vec![
        Span::styled(spinner_frame(tick), Style::default().fg(Color::Blue)),
        Span::raw(" Processing your request..."),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

/// Modal alert drawn over everything else
pub fn render_alert(f: &mut Frame, message: &str) {
    let area = centered_rect(50, 7, f.area());
    let text = vec![
        Line::from(Span::styled(
            message.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red))
                .title("Alert"),
        );

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

/// A rect `percent_x` wide and `height` rows tall, centered in `area`
pub fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

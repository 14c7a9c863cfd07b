use chrono::{DateTime, Local};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub const TITLE: &str = "Cloud Economics";

/// Render the branding header with key hints and the last update time
pub fn render(f: &mut Frame, area: Rect, last_update: Option<DateTime<Local>>) {
    let last_update = last_update
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "Never".to_string());

    let title = vec![
        Line::from(vec![
            Span::styled(
                TITLE,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" Dashboard"),
            Span::raw("  |  Last update: "),
            Span::styled(last_update, Style::default().fg(Color::Green)),
        ]),
        Line::from(Span::styled(
            "Tab/Shift-Tab: switch field | Enter: submit | Esc: quit",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(title).block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

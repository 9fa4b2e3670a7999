use crate::app::{CallbackPhase, CallbackSnapshot};
use ratatui::{
    Frame,
    prelude::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub(super) fn draw_callback(f: &mut Frame, area: Rect, state: &CallbackSnapshot) {
    let (headline, detail, color) = match state.phase {
        CallbackPhase::Loading => (
            "Connecting your account...",
            "Please wait a moment",
            Color::Gray,
        ),
        CallbackPhase::Success => (
            "Successfully connected!",
            "Redirecting to your library...",
            Color::Green,
        ),
        CallbackPhase::Error => ("Connection failed", "Redirecting to login...", Color::Red),
    };

    let mut lines = vec![Line::from(""), Line::from(headline)];
    if let Some(message) = state.message.as_deref() {
        lines.push(Line::from(message));
    }
    lines.push(Line::from(detail));

    let body = Paragraph::new(Text::from(lines))
        .style(Style::default().fg(color))
        .block(Block::default().borders(Borders::ALL).title("Spotify"))
        .wrap(Wrap { trim: false });
    f.render_widget(body, area);
}

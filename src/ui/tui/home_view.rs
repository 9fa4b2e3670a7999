use super::styles::hint_style;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub(super) fn draw_home(f: &mut Frame, area: Rect, logged_in: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    let hero = Paragraph::new(Text::from(vec![
        Line::from("Welcome to Melodiary"),
        Line::from("Your music library, consolidated across all streaming platforms"),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .wrap(Wrap { trim: false });
    f.render_widget(hero, chunks[0]);

    let features = Paragraph::new(Text::from(vec![
        Line::from("🎵 Connect Services"),
        Line::from("   Link Spotify, Apple Music, and more in one place"),
        Line::from(""),
        Line::from("📚 Unified Library"),
        Line::from("   See all your music from every platform together"),
        Line::from(""),
        Line::from("🔔 New Releases"),
        Line::from("   Get notified when your favorite artists drop new music"),
    ]))
    .block(Block::default().borders(Borders::ALL).title("Features"))
    .wrap(Wrap { trim: false });
    f.render_widget(features, chunks[1]);

    let cta = if logged_in {
        "Enter: open your library | ?: help | q: quit"
    } else {
        "Enter: get started | ?: help | q: quit"
    };
    let footer = Paragraph::new(cta).style(hint_style());
    f.render_widget(footer, chunks[2]);
}

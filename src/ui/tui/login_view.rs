use super::styles::hint_style;
use crate::app::LoginSnapshot;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    text::{Line, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub(super) fn draw_login(f: &mut Frame, area: Rect, state: &LoginSnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(area);

    let branding = Paragraph::new(Text::from(vec![
        Line::from("Melodiary"),
        Line::from("Your music, all in one place"),
    ]))
    .block(Block::default().borders(Borders::ALL))
    .wrap(Wrap { trim: false });
    f.render_widget(branding, chunks[0]);

    let action = if state.login_in_flight {
        "Connecting..."
    } else {
        "Continue with Spotify (Enter)"
    };
    let mut lines = vec![
        Line::from(action),
        Line::from(""),
        Line::from(state.login_status.as_str()),
    ];
    if let Some(url) = state.login_auth_url.as_deref() {
        // The browser opens on its own; the URL stays visible for
        // terminals where that fails.
        lines.push(Line::from(""));
        lines.push(Line::from(format!("If nothing opened, visit: {url}")));
    }
    let sign_in = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Sign in to continue"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(sign_in, chunks[1]);

    let footer = Paragraph::new(Text::from(vec![
        Line::from("By continuing, you agree to connect your Spotify account to Melodiary."),
        Line::from("More platforms coming soon"),
    ]))
    .style(hint_style());
    f.render_widget(footer, chunks[2]);
}

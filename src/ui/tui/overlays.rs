use ratatui::{
    Frame,
    prelude::Rect,
    text::{Line, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

pub(super) fn draw_help_overlay(f: &mut Frame, area: Rect) {
    let width = area.width.saturating_sub(4).min(70);
    let height = area.height.saturating_sub(4).min(20);
    let popup = centered_rect(area, width, height);

    f.render_widget(Clear, popup);

    let lines = vec![
        Line::from("1 / 2: Switch view"),
        Line::from("Enter: Confirm / Sign in"),
        Line::from(""),
        Line::from("Library"),
        Line::from("Tab: Next pane"),
        Line::from("Up/Down: Move selection"),
        Line::from("s: Sync Spotify library"),
        Line::from("m: Load more tracks"),
        Line::from("d / Del: Remove track"),
        Line::from("r: Reload tracks"),
        Line::from("e: Export playlist"),
        Line::from("i: Import last export"),
        Line::from("x: Disconnect platform"),
        Line::from("n / f / t: Notifications, frequency, theme"),
        Line::from("L: Sign out"),
        Line::from(""),
        Line::from("q: Quit"),
        Line::from("? / Esc: Close help"),
    ];
    let help = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Help"))
        .wrap(Wrap { trim: false });
    f.render_widget(help, popup);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

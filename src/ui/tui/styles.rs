use ratatui::style::{Color, Style};

pub(super) fn hint_style() -> Style {
    Style::default().fg(Color::DarkGray)
}

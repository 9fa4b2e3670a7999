use super::callback_view::draw_callback;
use super::home_view::draw_home;
use super::library_view::draw_library;
use super::login_view::draw_login;
use super::overlays::draw_help_overlay;
use crate::app::{AppSnapshot, AppViewSnapshot, View, nav_configs, nav_index_for_view};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, Tabs},
};

pub(super) fn draw_ui(f: &mut Frame, app: &AppSnapshot) {
    let size = f.area();

    let configs = nav_configs(app.logged_in);
    let titles: Vec<Line> = configs.iter().map(|c| Line::from(c.title)).collect();
    // The callback view has no nav slot, so nothing is highlighted there.
    let selected = nav_index_for_view(app.view, app.logged_in);

    let tabs = Tabs::new(titles)
        .select(selected)
        .divider("|")
        .padding(" ", " ")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("melodiary-tui"),
        )
        .style(Style::default().fg(Color::Gray))
        .highlight_style(Style::default().fg(Color::Yellow));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(size);
    f.render_widget(tabs, chunks[0]);

    match (&app.view, &app.view_state) {
        (View::Home, AppViewSnapshot::Home) => {
            draw_home(f, chunks[1], app.logged_in);
        }
        (View::Login, AppViewSnapshot::Login(state)) => {
            draw_login(f, chunks[1], state);
        }
        (View::Callback, AppViewSnapshot::Callback(state)) => {
            draw_callback(f, chunks[1], state);
        }
        (View::Library, AppViewSnapshot::Library(state)) => {
            draw_library(f, chunks[1], state);
        }
        _ => {}
    }

    if app.help_visible {
        draw_help_overlay(f, size);
    }
}

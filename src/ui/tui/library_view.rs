use super::styles::hint_style;
use super::utils::{frequency_label, platform_label, theme_label, two_column_line};
use super::widgets::list_state;
use crate::app::{LibraryPane, LibrarySnapshot};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout},
    prelude::Rect,
    style::{Color, Style},
    text::{Line, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
};

pub(super) fn draw_library(f: &mut Frame, area: Rect, state: &LibrarySnapshot) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Length(5),
        ])
        .split(area);

    draw_pane_bar(f, chunks[0], state.pane);
    match state.pane {
        LibraryPane::Tracks => draw_tracks(f, chunks[1], state),
        LibraryPane::Playlists => draw_playlists(f, chunks[1], state),
        LibraryPane::Profile => draw_profile(f, chunks[1], state),
    }
    draw_status(f, chunks[2], state);
}

fn draw_pane_bar(f: &mut Frame, area: Rect, pane: LibraryPane) {
    let selected = match pane {
        LibraryPane::Tracks => 0,
        LibraryPane::Playlists => 1,
        LibraryPane::Profile => 2,
    };
    let tabs = Tabs::new(vec![
        Line::from("Tracks"),
        Line::from("Playlists"),
        Line::from("Profile"),
    ])
    .select(selected)
    .divider("|")
    .padding(" ", " ")
    .block(Block::default().borders(Borders::ALL).title("Library"))
    .style(Style::default().fg(Color::Gray))
    .highlight_style(Style::default().fg(Color::Yellow));
    f.render_widget(tabs, area);
}

fn draw_tracks(f: &mut Frame, area: Rect, state: &LibrarySnapshot) {
    let title = if state.tracks.is_empty() {
        "Your Tracks".to_owned()
    } else {
        format!("Your Tracks (showing {})", state.tracks.len())
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if state.tracks.is_empty() {
        let message = if state.tracks_loading {
            "Loading tracks..."
        } else {
            "No tracks yet. Sync your Spotify library to get started."
        };
        let body = Paragraph::new(message)
            .style(hint_style())
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(body, area);
        return;
    }

    let row_width = area.width.saturating_sub(2) as usize;
    let mut items: Vec<ListItem> = state
        .tracks
        .iter()
        .map(|t| {
            let removing = state.track_deleting.as_deref() == Some(t.track_id.as_str());
            let mut left = format!("{} - {} · {}", t.track_name, t.artist_name, t.album_name);
            if removing {
                left.push_str(" (removing...)");
            }
            let line = two_column_line(&left, platform_label(&t.platform), row_width);
            if removing {
                ListItem::new(Line::from(line)).style(hint_style())
            } else {
                ListItem::new(Line::from(line))
            }
        })
        .collect();
    // Mirrors the trailing "Load more" row of the page this replaces.
    if state.tracks_loading {
        items.push(ListItem::new(Line::from("Loading...")).style(hint_style()));
    } else if state.has_more {
        items.push(ListItem::new(Line::from("Load more tracks (m)")).style(hint_style()));
    }

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_stateful_widget(list, area, &mut list_state(state.tracks_selected));
}

fn draw_playlists(f: &mut Frame, area: Rect, state: &LibrarySnapshot) {
    let row_width = area.width.saturating_sub(2) as usize;
    let mut items: Vec<ListItem> = state
        .playlists
        .iter()
        .map(|p| {
            let left = format!("{} ({} tracks)", p.name, p.track_count);
            ListItem::new(Line::from(two_column_line(
                &left,
                platform_label(&p.platform),
                row_width,
            )))
        })
        .collect();
    if let Some((name, count)) = &state.exported {
        items.push(
            ListItem::new(Line::from(format!(
                "Last export: \"{name}\" ({count} tracks). Press i to import."
            )))
            .style(hint_style()),
        );
    }

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Your Playlists"),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_stateful_widget(list, area, &mut list_state(state.playlists_selected));
}

fn draw_profile(f: &mut Frame, area: Rect, state: &LibrarySnapshot) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let mut lines = Vec::new();
    match &state.profile {
        Some(user) => {
            lines.push(Line::from(user.display_name.clone()));
            lines.push(Line::from(user.email.clone()));
            lines.push(Line::from(format!("User ID: {}", user.user_id)));
            if let Some(created) = user.created_at {
                lines.push(Line::from(format!(
                    "Member since: {}",
                    created.format("%Y-%m-%d")
                )));
            }
            if let Some(spotify_id) = user.spotify_id.as_deref() {
                lines.push(Line::from(format!("Spotify ID: {spotify_id}")));
            }
            lines.push(Line::from(""));
            let prefs = &user.preferences;
            lines.push(Line::from(format!(
                "Email notifications: {} (n)",
                if prefs.email_notifications { "On" } else { "Off" }
            )));
            lines.push(Line::from(format!(
                "Frequency: {} (f)",
                frequency_label(prefs.notification_frequency)
            )));
            lines.push(Line::from(format!(
                "Theme: {} (t)",
                theme_label(prefs.theme)
            )));
            if let Some(addr) = prefs.email_address.as_deref() {
                lines.push(Line::from(format!("Notify at: {addr}")));
            }
        }
        None => lines.push(Line::from("Loading profile...")),
    }
    let profile = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Profile"))
        .wrap(Wrap { trim: false });
    f.render_widget(profile, halves[0]);

    let row_width = halves[1].width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = state
        .connections
        .iter()
        .map(|c| {
            let status = if c.connected {
                match c.display_name.as_deref() {
                    Some(name) => format!("Connected as {name}"),
                    None => "Connected".to_owned(),
                }
            } else {
                "Not connected".to_owned()
            };
            ListItem::new(Line::from(two_column_line(
                platform_label(&c.platform),
                &status,
                row_width,
            )))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Connections"),
        )
        .highlight_style(Style::default().fg(Color::Yellow));
    f.render_stateful_widget(list, halves[1], &mut list_state(state.connections_selected));
}

fn draw_status(f: &mut Frame, area: Rect, state: &LibrarySnapshot) {
    let pane_status = match state.pane {
        LibraryPane::Tracks => state.library_status.as_str(),
        LibraryPane::Playlists => state.playlists_status.as_str(),
        LibraryPane::Profile => state.profile_status.as_str(),
    };
    let sync = if state.sync_status.is_empty() {
        "Press s to sync your Spotify library."
    } else {
        state.sync_status.as_str()
    };
    let hints = match state.pane {
        LibraryPane::Tracks => {
            "↑↓ select | d remove | m more | r reload | s sync | Tab pane | L sign out"
        }
        LibraryPane::Playlists => {
            "↑↓ select | e export | i import | s sync | Tab pane | L sign out"
        }
        LibraryPane::Profile => {
            "↑↓ connection | x disconnect | n/f/t preferences | Tab pane | L sign out"
        }
    };

    let lines = vec![
        Line::from(pane_status.to_owned()),
        Line::from(sync.to_owned()),
        Line::from(hints).style(hint_style()),
    ];
    let footer = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .wrap(Wrap { trim: false });
    f.render_widget(footer, area);
}

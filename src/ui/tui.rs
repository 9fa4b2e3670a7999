mod callback_view;
mod event_loop;
mod guard;
mod home_view;
mod keyboard;
mod library_view;
mod login_view;
mod overlays;
mod styles;
mod utils;
mod views;
mod widgets;

use crate::app::AppSnapshot;
use crate::messages::app::{AppCommand, AppEvent};
use std::io;
use tokio::sync::mpsc;

/// Main TUI entry point, called from main.rs.
pub async fn run_tui(
    app: AppSnapshot,
    tx: mpsc::Sender<AppCommand>,
    rx: mpsc::Receiver<AppEvent>,
) -> io::Result<()> {
    event_loop::run_tui_internal(app, tx, rx).await
}

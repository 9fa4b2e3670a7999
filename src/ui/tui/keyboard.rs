use crate::app::{AppSnapshot, AppViewSnapshot, LibraryPane, View};
use crate::messages::app::AppCommand;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

pub(super) async fn handle_key(
    app: &AppSnapshot,
    key: KeyEvent,
    tx: &mpsc::Sender<AppCommand>,
) -> bool {
    // Some terminals/platforms may report both press and release events; we only act on press/repeat.
    if matches!(key.kind, KeyEventKind::Release) {
        return false;
    }

    if app.help_visible {
        match key.code {
            KeyCode::Char('?') | KeyCode::Esc => {
                let _ = tx.send(AppCommand::UiToggleHelp).await;
            }
            _ => {}
        }
        return false;
    }

    match key.code {
        KeyCode::Char('q') => {
            let _ = tx.send(AppCommand::Quit).await;
            return true;
        }
        KeyCode::Char('?') => {
            let _ = tx.send(AppCommand::UiToggleHelp).await;
            return false;
        }
        KeyCode::Char('1') => {
            let _ = tx.send(AppCommand::NavHome).await;
            return false;
        }
        KeyCode::Char('2') => {
            // The second nav slot is "Sign in" while logged out and
            // "Library" once signed in.
            let cmd = if app.logged_in {
                AppCommand::NavLibrary
            } else {
                AppCommand::NavLogin
            };
            let _ = tx.send(cmd).await;
            return false;
        }
        _ => {}
    }

    match app.view {
        View::Home => {
            if matches!(key.code, KeyCode::Enter) {
                let cmd = if app.logged_in {
                    AppCommand::NavLibrary
                } else {
                    AppCommand::NavLogin
                };
                let _ = tx.send(cmd).await;
            }
        }
        View::Login => {
            if matches!(key.code, KeyCode::Enter) {
                let _ = tx.send(AppCommand::LoginStart).await;
            }
        }
        View::Callback => {
            // Nothing to handle; the redirect listener drives this view.
        }
        View::Library => {
            match key.code {
                KeyCode::Tab => {
                    let _ = tx.send(AppCommand::LibraryPaneNext).await;
                    return false;
                }
                KeyCode::Char('s') => {
                    let _ = tx.send(AppCommand::LibrarySync).await;
                    return false;
                }
                KeyCode::Char('L') => {
                    let _ = tx.send(AppCommand::Logout).await;
                    return false;
                }
                _ => {}
            }

            let pane = match &app.view_state {
                AppViewSnapshot::Library(state) => state.pane,
                _ => LibraryPane::Tracks,
            };
            match pane {
                LibraryPane::Tracks => match key.code {
                    KeyCode::Up => {
                        let _ = tx.send(AppCommand::LibraryMoveUp).await;
                    }
                    KeyCode::Down => {
                        let _ = tx.send(AppCommand::LibraryMoveDown).await;
                    }
                    KeyCode::Char('m') => {
                        let _ = tx.send(AppCommand::LibraryLoadMore).await;
                    }
                    KeyCode::Char('d') | KeyCode::Delete => {
                        let _ = tx.send(AppCommand::LibraryDeleteSelected).await;
                    }
                    KeyCode::Char('r') => {
                        let _ = tx.send(AppCommand::LibraryRefresh).await;
                    }
                    _ => {}
                },
                LibraryPane::Playlists => match key.code {
                    KeyCode::Up => {
                        let _ = tx.send(AppCommand::PlaylistsMoveUp).await;
                    }
                    KeyCode::Down => {
                        let _ = tx.send(AppCommand::PlaylistsMoveDown).await;
                    }
                    KeyCode::Char('e') => {
                        let _ = tx.send(AppCommand::PlaylistExportSelected).await;
                    }
                    KeyCode::Char('i') => {
                        let _ = tx.send(AppCommand::PlaylistImportExported).await;
                    }
                    _ => {}
                },
                LibraryPane::Profile => match key.code {
                    KeyCode::Up => {
                        let _ = tx.send(AppCommand::ConnectionsMoveUp).await;
                    }
                    KeyCode::Down => {
                        let _ = tx.send(AppCommand::ConnectionsMoveDown).await;
                    }
                    KeyCode::Char('x') => {
                        let _ = tx.send(AppCommand::ConnectionDisconnectSelected).await;
                    }
                    KeyCode::Char('n') => {
                        let _ = tx.send(AppCommand::PrefToggleEmailNotifications).await;
                    }
                    KeyCode::Char('f') => {
                        let _ = tx.send(AppCommand::PrefCycleFrequency).await;
                    }
                    KeyCode::Char('t') => {
                        let _ = tx.send(AppCommand::PrefCycleTheme).await;
                    }
                    _ => {}
                },
            }
        }
    }

    false
}

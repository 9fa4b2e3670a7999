use std::time::Instant;

use crate::domain::model::{PlatformConnection, Playlist, Track, User};

const LOGIN_PROMPT: &str = "Press Enter to sign in with Spotify.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    Callback,
    Library,
}

/// Active pane inside the library view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryPane {
    Tracks,
    Playlists,
    Profile,
}

impl LibraryPane {
    pub fn next(self) -> Self {
        match self {
            LibraryPane::Tracks => LibraryPane::Playlists,
            LibraryPane::Playlists => LibraryPane::Profile,
            LibraryPane::Profile => LibraryPane::Tracks,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackPhase {
    Loading,
    Success,
    Error,
}

/// A navigation scheduled for a later tick, e.g. "to the library in 1.5s
/// after a successful sign-in".
#[derive(Debug, Clone, Copy)]
pub struct PendingRedirect {
    pub view: View,
    pub at: Instant,
}

/// The most recently exported playlist, kept for a follow-up import.
#[derive(Debug, Clone)]
pub struct ExportedPlaylist {
    pub name: String,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone)]
pub struct App {
    pub view: View,
    pub logged_in: bool,
    pub user_id: Option<String>,
    pub help_visible: bool,
    pub pending_redirect: Option<PendingRedirect>,

    pub login_status: String,
    pub login_auth_url: Option<String>,
    pub login_in_flight: bool,

    pub callback_phase: CallbackPhase,
    pub callback_message: Option<String>,
    /// Latch against duplicate redirect deliveries for one sign-in attempt.
    pub callback_processed: bool,

    pub library_pane: LibraryPane,
    pub tracks: Vec<Track>,
    pub tracks_cursor: Option<String>,
    pub tracks_loading: bool,
    pub tracks_selected: usize,
    /// Track id with a delete in flight; blocks further deletes.
    pub track_deleting: Option<String>,
    pub library_status: String,
    pub sync_in_flight: bool,
    pub sync_status: String,
    /// Bumped after each completed sync so the list visibly reloads.
    pub library_refresh_key: u64,

    pub playlists: Vec<Playlist>,
    pub playlists_selected: usize,
    pub playlists_loaded: bool,
    pub playlists_status: String,
    pub exported: Option<ExportedPlaylist>,
    pub import_in_flight: bool,

    pub profile: Option<User>,
    pub connections: Vec<PlatformConnection>,
    pub connections_selected: usize,
    pub profile_status: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            view: View::Home,
            logged_in: false,
            user_id: None,
            help_visible: false,
            pending_redirect: None,

            login_status: LOGIN_PROMPT.to_owned(),
            login_auth_url: None,
            login_in_flight: false,

            callback_phase: CallbackPhase::Loading,
            callback_message: None,
            callback_processed: false,

            library_pane: LibraryPane::Tracks,
            tracks: Vec::new(),
            tracks_cursor: None,
            tracks_loading: false,
            tracks_selected: 0,
            track_deleting: None,
            library_status: String::new(),
            sync_in_flight: false,
            sync_status: String::new(),
            library_refresh_key: 0,

            playlists: Vec::new(),
            playlists_selected: 0,
            playlists_loaded: false,
            playlists_status: String::new(),
            exported: None,
            import_in_flight: false,

            profile: None,
            connections: Vec::new(),
            connections_selected: 0,
            profile_status: String::new(),
        }
    }
}

impl App {
    /// Drop everything tied to the signed-in user. Used on logout and when
    /// the backend reports the session expired.
    pub fn reset_user_state(&mut self) {
        self.logged_in = false;
        self.user_id = None;
        self.pending_redirect = None;
        self.login_status = LOGIN_PROMPT.to_owned();
        self.login_auth_url = None;
        self.login_in_flight = false;
        self.callback_phase = CallbackPhase::Loading;
        self.callback_message = None;
        self.library_pane = LibraryPane::Tracks;
        self.tracks.clear();
        self.tracks_cursor = None;
        self.tracks_loading = false;
        self.tracks_selected = 0;
        self.track_deleting = None;
        self.library_status.clear();
        self.sync_in_flight = false;
        self.sync_status.clear();
        self.playlists.clear();
        self.playlists_selected = 0;
        self.playlists_loaded = false;
        self.playlists_status.clear();
        self.exported = None;
        self.import_in_flight = false;
        self.profile = None;
        self.connections.clear();
        self.connections_selected = 0;
        self.profile_status.clear();
    }
}

/// Immutable copy of the state the UI thread renders from.
///
/// The core owns `App` and keeps mutating it; the UI gets an owned
/// snapshot per change over the event channel, so only the data of the
/// active view is cloned.
#[derive(Debug, Clone)]
pub struct AppSnapshot {
    pub view: View,
    pub logged_in: bool,
    pub user_id: Option<String>,
    pub help_visible: bool,
    pub view_state: AppViewSnapshot,
}

#[derive(Debug, Clone)]
pub enum AppViewSnapshot {
    Home,
    Login(LoginSnapshot),
    Callback(CallbackSnapshot),
    Library(LibrarySnapshot),
}

#[derive(Debug, Clone)]
pub struct LoginSnapshot {
    pub login_status: String,
    pub login_auth_url: Option<String>,
    pub login_in_flight: bool,
}

#[derive(Debug, Clone)]
pub struct CallbackSnapshot {
    pub phase: CallbackPhase,
    pub message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct LibrarySnapshot {
    pub pane: LibraryPane,
    pub tracks: Vec<Track>,
    pub tracks_selected: usize,
    pub tracks_loading: bool,
    pub has_more: bool,
    pub track_deleting: Option<String>,
    pub library_status: String,
    pub sync_status: String,
    pub playlists: Vec<Playlist>,
    pub playlists_selected: usize,
    pub playlists_status: String,
    /// Name and track count of the last export, if any.
    pub exported: Option<(String, usize)>,
    pub profile: Option<User>,
    pub connections: Vec<PlatformConnection>,
    pub connections_selected: usize,
    pub profile_status: String,
}

impl AppSnapshot {
    pub fn from_app(app: &App) -> Self {
        let view_state = match app.view {
            View::Home => AppViewSnapshot::Home,
            View::Login => AppViewSnapshot::Login(LoginSnapshot {
                login_status: app.login_status.clone(),
                login_auth_url: app.login_auth_url.clone(),
                login_in_flight: app.login_in_flight,
            }),
            View::Callback => AppViewSnapshot::Callback(CallbackSnapshot {
                phase: app.callback_phase,
                message: app.callback_message.clone(),
            }),
            View::Library => AppViewSnapshot::Library(LibrarySnapshot {
                pane: app.library_pane,
                tracks: if matches!(app.library_pane, LibraryPane::Tracks) {
                    app.tracks.clone()
                } else {
                    Vec::new()
                },
                tracks_selected: app.tracks_selected,
                tracks_loading: app.tracks_loading,
                has_more: app.tracks_cursor.is_some(),
                track_deleting: app.track_deleting.clone(),
                library_status: app.library_status.clone(),
                sync_status: app.sync_status.clone(),
                playlists: if matches!(app.library_pane, LibraryPane::Playlists) {
                    app.playlists.clone()
                } else {
                    Vec::new()
                },
                playlists_selected: app.playlists_selected,
                playlists_status: app.playlists_status.clone(),
                exported: app
                    .exported
                    .as_ref()
                    .map(|e| (e.name.clone(), e.tracks.len())),
                profile: if matches!(app.library_pane, LibraryPane::Profile) {
                    app.profile.clone()
                } else {
                    None
                },
                connections: if matches!(app.library_pane, LibraryPane::Profile) {
                    app.connections.clone()
                } else {
                    Vec::new()
                },
                connections_selected: app.connections_selected,
                profile_status: app.profile_status.clone(),
            }),
        };

        Self {
            view: app.view,
            logged_in: app.logged_in,
            user_id: app.user_id.clone(),
            help_visible: app.help_visible,
            view_state,
        }
    }
}

use crate::app::{AppSnapshot, LibraryPane};

/// Commands flowing from the UI thread into the core.
#[derive(Debug)]
pub enum AppCommand {
    Bootstrap,
    Quit,
    UiToggleHelp,
    NavHome,
    NavLogin,
    NavLibrary,
    LoginStart,
    Logout,
    LibraryPaneNext,
    LibraryPaneTo { pane: LibraryPane },
    LibraryMoveUp,
    LibraryMoveDown,
    LibraryLoadMore,
    LibraryDeleteSelected,
    LibrarySync,
    LibraryRefresh,
    PlaylistsMoveUp,
    PlaylistsMoveDown,
    PlaylistExportSelected,
    PlaylistImportExported,
    ConnectionsMoveUp,
    ConnectionsMoveDown,
    ConnectionDisconnectSelected,
    PrefToggleEmailNotifications,
    PrefCycleFrequency,
    PrefCycleTheme,
}

/// Events flowing from the core back to the UI thread.
#[derive(Debug)]
pub enum AppEvent {
    State(Box<AppSnapshot>),
    Toast(String),
    Error(String),
}

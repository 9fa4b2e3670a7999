use super::{CoreState, UiAction};
use crate::api::actor::{ApiCommand, ApiEvent};
use crate::app::{App, LibraryPane};
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::core::utils;
use crate::messages::app::AppCommand;

/// Page size for library fetches.
pub const PAGE_LIMIT: u32 = 50;

const EMPTY_LIBRARY: &str = "No tracks yet. Sync your Spotify library to get started.";

/// View-enter hook: fetch the first page once.
pub fn enter(state: &mut CoreState, effects: &mut CoreEffects) {
    if state.app.tracks.is_empty() && !state.app.tracks_loading {
        start_fetch(None, state, effects);
    }
}

fn start_fetch(cursor: Option<String>, state: &mut CoreState, effects: &mut CoreEffects) {
    state.app.tracks_loading = true;
    state.library_fetch_append = cursor.is_some();
    if cursor.is_none() {
        state.app.library_status = "Loading tracks...".to_owned();
    }
    effects.emit_state(&state.app);
    let id = state
        .request_tracker
        .issue(RequestKey::LibraryPage, || utils::next_id(&mut state.req_id));
    effects.send_api_warn(
        ApiCommand::FetchLibraryPage {
            req_id: id,
            limit: PAGE_LIMIT,
            last_key: cursor,
        },
        "api channel closed: FetchLibraryPage not sent",
    );
}

fn reset_list(app: &mut App) {
    app.tracks.clear();
    app.tracks_cursor = None;
    app.tracks_selected = 0;
}

fn clamp_selection(app: &mut App) {
    if app.tracks_selected >= app.tracks.len() {
        app.tracks_selected = app.tracks.len().saturating_sub(1);
    }
}

pub async fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> UiAction {
    match cmd {
        AppCommand::LibraryPaneNext => {
            set_pane(state.app.library_pane.next(), state, effects);
        }
        AppCommand::LibraryPaneTo { pane } => {
            set_pane(*pane, state, effects);
        }
        AppCommand::LibraryMoveUp => {
            state.app.tracks_selected = state.app.tracks_selected.saturating_sub(1);
            effects.emit_state(&state.app);
        }
        AppCommand::LibraryMoveDown => {
            if state.app.tracks_selected + 1 < state.app.tracks.len() {
                state.app.tracks_selected += 1;
            }
            effects.emit_state(&state.app);
        }
        AppCommand::LibraryLoadMore => {
            if state.app.tracks_loading {
                return UiAction::Handled;
            }
            let Some(cursor) = state.app.tracks_cursor.clone() else {
                state.app.library_status = "No more tracks to load.".to_owned();
                effects.emit_state(&state.app);
                return UiAction::Handled;
            };
            start_fetch(Some(cursor), state, effects);
        }
        AppCommand::LibraryDeleteSelected => {
            if state.app.track_deleting.is_some() {
                return UiAction::Handled;
            }
            let Some(track) = state.app.tracks.get(state.app.tracks_selected) else {
                return UiAction::Handled;
            };
            let track_id = track.track_id.clone();
            let track_name = track.track_name.clone();
            state.app.track_deleting = Some(track_id.clone());
            state.app.library_status = format!("Removing \"{track_name}\"...");
            effects.emit_state(&state.app);
            let id = state
                .request_tracker
                .issue(RequestKey::DeleteTrack, || utils::next_id(&mut state.req_id));
            effects.send_api_warn(
                ApiCommand::DeleteTrack {
                    req_id: id,
                    track_id,
                },
                "api channel closed: DeleteTrack not sent",
            );
        }
        AppCommand::LibrarySync => {
            if state.app.sync_in_flight {
                return UiAction::Handled;
            }
            state.app.sync_in_flight = true;
            state.app.sync_status = "Syncing your Spotify library...".to_owned();
            effects.emit_state(&state.app);
            let id = state
                .request_tracker
                .issue(RequestKey::Sync, || utils::next_id(&mut state.req_id));
            effects.send_api_warn(
                ApiCommand::SyncPlatform {
                    req_id: id,
                    platform: "spotify".to_owned(),
                },
                "api channel closed: SyncPlatform not sent",
            );
        }
        AppCommand::LibraryRefresh => {
            reset_list(&mut state.app);
            start_fetch(None, state, effects);
        }
        _ => return UiAction::NotHandled,
    }
    UiAction::Handled
}

fn set_pane(pane: LibraryPane, state: &mut CoreState, effects: &mut CoreEffects) {
    state.app.library_pane = pane;
    match pane {
        LibraryPane::Tracks => enter(state, effects),
        LibraryPane::Playlists => super::playlists::enter(state, effects),
        LibraryPane::Profile => super::profile::enter(state, effects),
    }
    effects.emit_state(&state.app);
}

pub async fn handle_api_event(
    evt: &ApiEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> bool {
    match evt {
        ApiEvent::LibraryPage { req_id, page } => {
            if !state
                .request_tracker
                .accept(&RequestKey::LibraryPage, *req_id)
            {
                tracing::debug!(req_id, "stale LibraryPage response dropped");
                return false;
            }
            state.app.tracks_loading = false;
            if state.library_fetch_append {
                state.app.tracks.extend(page.items.iter().cloned());
            } else {
                state.app.tracks = page.items.clone();
            }
            state.app.tracks_cursor = page.cursor.clone();
            if state.app.tracks.is_empty() {
                state.app.library_status = EMPTY_LIBRARY.to_owned();
            } else {
                state.app.library_status.clear();
            }
            clamp_selection(&mut state.app);
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::TrackDeleted { req_id, track_id } => {
            if !state
                .request_tracker
                .accept(&RequestKey::DeleteTrack, *req_id)
            {
                tracing::debug!(req_id, "stale TrackDeleted response dropped");
                return false;
            }
            state.app.track_deleting = None;
            state.app.tracks.retain(|t| t.track_id != *track_id);
            clamp_selection(&mut state.app);
            state.app.library_status = if state.app.tracks.is_empty() {
                EMPTY_LIBRARY.to_owned()
            } else {
                "Track removed.".to_owned()
            };
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::SyncFinished { req_id, report } => {
            if !state.request_tracker.accept(&RequestKey::Sync, *req_id) {
                tracing::debug!(req_id, "stale SyncFinished response dropped");
                return false;
            }
            state.app.sync_in_flight = false;
            state.app.sync_status = if report.malformed > 0 {
                format!(
                    "{} {} track(s) could not be processed.",
                    report.message, report.malformed
                )
            } else {
                report.message.clone()
            };
            state.app.library_refresh_key += 1;
            // Synced tracks only show up on a fresh first page.
            reset_list(&mut state.app);
            start_fetch(None, state, effects);
            true
        }
        ApiEvent::Error { req_id, message } => {
            if state
                .request_tracker
                .accept(&RequestKey::LibraryPage, *req_id)
            {
                tracing::warn!(req_id, message = %message, "library page fetch failed");
                state.app.tracks_loading = false;
                state.app.library_status = "Failed to load library.".to_owned();
                effects.emit_state(&state.app);
                return true;
            }
            if state
                .request_tracker
                .accept(&RequestKey::DeleteTrack, *req_id)
            {
                tracing::warn!(req_id, message = %message, "track delete failed");
                state.app.track_deleting = None;
                state.app.library_status = format!("Failed to remove track: {message}");
                effects.emit_state(&state.app);
                return true;
            }
            if state.request_tracker.accept(&RequestKey::Sync, *req_id) {
                tracing::warn!(req_id, message = %message, "sync failed");
                state.app.sync_in_flight = false;
                state.app.sync_status = format!("Sync failed: {message}");
                effects.emit_state(&state.app);
                return true;
            }
            false
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::effects::CoreEffect;
    use crate::domain::model::{Platform, SyncReport, Track, TrackPage};

    fn track(id: &str, name: &str) -> Track {
        Track {
            track_id: id.to_owned(),
            track_name: name.to_owned(),
            artist_name: "Artist".to_owned(),
            album_name: "Album".to_owned(),
            platform: Platform::Spotify,
            platform_track_id: None,
            platform_album_id: None,
            platform_artist_id: None,
            cover_art_url: None,
            added_at: None,
            is_manual: false,
            duration: None,
            release_year: None,
            genre: None,
            notes: None,
        }
    }

    fn page(tracks: Vec<Track>, cursor: Option<&str>) -> TrackPage {
        TrackPage {
            count: tracks.len() as u64,
            items: tracks,
            cursor: cursor.map(str::to_owned),
        }
    }

    async fn deliver_page(state: &mut CoreState, req_id: u64, page: TrackPage) {
        let mut effects = CoreEffects::default();
        let handled =
            handle_api_event(&ApiEvent::LibraryPage { req_id, page }, state, &mut effects).await;
        assert!(handled);
    }

    #[tokio::test]
    async fn enter_fetches_first_page_once() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        enter(&mut state, &mut effects);
        assert!(state.app.tracks_loading);
        assert_eq!(state.app.library_status, "Loading tracks...");
        assert_eq!(effects.actions.len(), 2); // state + send

        // Already loading: no second fetch.
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);
        assert!(effects.actions.is_empty());
    }

    #[tokio::test]
    async fn first_page_replaces_list() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);

        deliver_page(
            &mut state,
            1,
            page(vec![track("t1", "One"), track("t2", "Two")], Some("cursor")),
        )
        .await;

        assert!(!state.app.tracks_loading);
        assert_eq!(state.app.tracks.len(), 2);
        assert_eq!(state.app.tracks_cursor.as_deref(), Some("cursor"));
        assert!(state.app.library_status.is_empty());
    }

    #[tokio::test]
    async fn load_more_appends() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);
        deliver_page(&mut state, 1, page(vec![track("t1", "One")], Some("k1"))).await;

        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::LibraryLoadMore, &mut state, &mut effects).await;
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::FetchLibraryPage {
                    last_key: Some(k),
                    ..
                },
                ..
            } if k == "k1"
        )));

        deliver_page(&mut state, 2, page(vec![track("t2", "Two")], None)).await;
        assert_eq!(state.app.tracks.len(), 2);
        assert!(state.app.tracks_cursor.is_none());
    }

    #[tokio::test]
    async fn load_more_without_cursor_reports_end() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);
        deliver_page(&mut state, 1, page(vec![track("t1", "One")], None)).await;

        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::LibraryLoadMore, &mut state, &mut effects).await;

        assert_eq!(state.app.library_status, "No more tracks to load.");
        assert!(!effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::FetchLibraryPage { .. },
                ..
            }
        )));
    }

    #[tokio::test]
    async fn empty_first_page_shows_empty_state() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);

        deliver_page(&mut state, 1, page(vec![], None)).await;

        assert_eq!(state.app.library_status, EMPTY_LIBRARY);
    }

    #[tokio::test]
    async fn delete_selected_sends_command_and_prunes_on_ack() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);
        deliver_page(
            &mut state,
            1,
            page(vec![track("t1", "One"), track("t2", "Two")], None),
        )
        .await;
        state.app.tracks_selected = 1;

        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::LibraryDeleteSelected,
            &mut state,
            &mut effects,
        )
        .await;

        assert_eq!(state.app.track_deleting.as_deref(), Some("t2"));
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::DeleteTrack { track_id, .. },
                ..
            } if track_id == "t2"
        )));

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::TrackDeleted {
            req_id: 2,
            track_id: "t2".to_owned(),
        };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(handled);
        assert!(state.app.track_deleting.is_none());
        assert_eq!(state.app.tracks.len(), 1);
        // Selection clamped back onto the remaining track.
        assert_eq!(state.app.tracks_selected, 0);
    }

    #[tokio::test]
    async fn second_delete_waits_for_first() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);
        deliver_page(
            &mut state,
            1,
            page(vec![track("t1", "One"), track("t2", "Two")], None),
        )
        .await;

        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::LibraryDeleteSelected,
            &mut state,
            &mut effects,
        )
        .await;
        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::LibraryDeleteSelected,
            &mut state,
            &mut effects,
        )
        .await;

        assert!(effects.actions.is_empty());
    }

    #[tokio::test]
    async fn sync_refetches_from_scratch() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);
        deliver_page(&mut state, 1, page(vec![track("t1", "One")], Some("k1"))).await;

        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::LibrarySync, &mut state, &mut effects).await;
        assert!(state.app.sync_in_flight);
        assert_eq!(state.app.sync_status, "Syncing your Spotify library...");

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::SyncFinished {
            req_id: 2,
            report: SyncReport {
                synced: 12,
                malformed: 0,
                message: "Synced 12 tracks".to_owned(),
            },
        };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(handled);
        assert!(!state.app.sync_in_flight);
        assert_eq!(state.app.sync_status, "Synced 12 tracks");
        assert_eq!(state.app.library_refresh_key, 1);
        // List was reset and a fresh first page requested.
        assert!(state.app.tracks.is_empty());
        assert!(state.app.tracks_cursor.is_none());
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::FetchLibraryPage { last_key: None, .. },
                ..
            }
        )));
    }

    #[tokio::test]
    async fn sync_report_mentions_malformed_tracks() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        handle_ui(&AppCommand::LibrarySync, &mut state, &mut effects).await;

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::SyncFinished {
            req_id: 1,
            report: SyncReport {
                synced: 10,
                malformed: 2,
                message: "Synced 10 tracks".to_owned(),
            },
        };
        handle_api_event(&evt, &mut state, &mut effects).await;

        assert_eq!(
            state.app.sync_status,
            "Synced 10 tracks 2 track(s) could not be processed."
        );
    }

    #[tokio::test]
    async fn page_fetch_failure_sets_status() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::Error {
            req_id: 1,
            message: "boom".to_owned(),
        };
        let handled = handle_api_event(&evt, &mut state, &mut effects).await;

        assert!(handled);
        assert!(!state.app.tracks_loading);
        assert_eq!(state.app.library_status, "Failed to load library.");
    }
}

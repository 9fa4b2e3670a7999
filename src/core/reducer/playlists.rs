use super::{CoreState, UiAction};
use crate::api::actor::{ApiCommand, ApiEvent};
use crate::api::models::convert;
use crate::app::ExportedPlaylist;
use crate::core::effects::CoreEffects;
use crate::core::infra::RequestKey;
use crate::core::utils;
use crate::messages::app::AppCommand;

/// Pane-enter hook: fetch the playlist list once per session.
pub fn enter(state: &mut CoreState, effects: &mut CoreEffects) {
    if state.app.playlists_loaded || state.request_tracker.is_pending(&RequestKey::Playlists) {
        return;
    }
    state.app.playlists_status = "Loading playlists...".to_owned();
    effects.emit_state(&state.app);
    let id = state
        .request_tracker
        .issue(RequestKey::Playlists, || utils::next_id(&mut state.req_id));
    effects.send_api_warn(
        ApiCommand::FetchPlaylists {
            req_id: id,
            platform: "spotify".to_owned(),
        },
        "api channel closed: FetchPlaylists not sent",
    );
}

pub async fn handle_ui(
    cmd: &AppCommand,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> UiAction {
    match cmd {
        AppCommand::PlaylistsMoveUp => {
            state.app.playlists_selected = state.app.playlists_selected.saturating_sub(1);
            effects.emit_state(&state.app);
        }
        AppCommand::PlaylistsMoveDown => {
            if state.app.playlists_selected + 1 < state.app.playlists.len() {
                state.app.playlists_selected += 1;
            }
            effects.emit_state(&state.app);
        }
        AppCommand::PlaylistExportSelected => {
            if state.request_tracker.is_pending(&RequestKey::ExportPlaylist) {
                return UiAction::Handled;
            }
            let Some(playlist) = state.app.playlists.get(state.app.playlists_selected) else {
                return UiAction::Handled;
            };
            let playlist_id = playlist.playlist_id.clone();
            let name = playlist.name.clone();
            let platform = convert::platform_to_string(&playlist.platform);
            state.app.playlists_status = format!("Exporting \"{name}\"...");
            effects.emit_state(&state.app);
            let id = state
                .request_tracker
                .issue(RequestKey::ExportPlaylist, || {
                    utils::next_id(&mut state.req_id)
                });
            effects.send_api_warn(
                ApiCommand::ExportPlaylist {
                    req_id: id,
                    platform,
                    playlist_id,
                },
                "api channel closed: ExportPlaylist not sent",
            );
        }
        AppCommand::PlaylistImportExported => {
            if state.app.import_in_flight {
                return UiAction::Handled;
            }
            let Some(exported) = state.app.exported.clone() else {
                state.app.playlists_status = "Export a playlist first, then import it.".to_owned();
                effects.emit_state(&state.app);
                return UiAction::Handled;
            };
            state.app.import_in_flight = true;
            state.app.playlists_status = format!(
                "Importing \"{}\" ({} tracks)...",
                exported.name,
                exported.tracks.len()
            );
            effects.emit_state(&state.app);
            let id = state
                .request_tracker
                .issue(RequestKey::ImportPlaylist, || {
                    utils::next_id(&mut state.req_id)
                });
            effects.send_api_warn(
                ApiCommand::ImportPlaylist {
                    req_id: id,
                    target_platform: "spotify".to_owned(),
                    playlist_name: format!("{} (Melodiary)", exported.name),
                    tracks: exported.tracks,
                },
                "api channel closed: ImportPlaylist not sent",
            );
        }
        _ => return UiAction::NotHandled,
    }
    UiAction::Handled
}

pub async fn handle_api_event(
    evt: &ApiEvent,
    state: &mut CoreState,
    effects: &mut CoreEffects,
) -> bool {
    match evt {
        ApiEvent::Playlists { req_id, playlists } => {
            if !state.request_tracker.accept(&RequestKey::Playlists, *req_id) {
                tracing::debug!(req_id, "stale Playlists response dropped");
                return false;
            }
            state.app.playlists_loaded = true;
            state.app.playlists = playlists.clone();
            if state.app.playlists_selected >= state.app.playlists.len() {
                state.app.playlists_selected = state.app.playlists.len().saturating_sub(1);
            }
            if state.app.playlists.is_empty() {
                state.app.playlists_status = "No playlists found on Spotify.".to_owned();
            } else {
                state.app.playlists_status.clear();
            }
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::PlaylistExported {
            req_id,
            playlist_id,
            tracks,
        } => {
            if !state
                .request_tracker
                .accept(&RequestKey::ExportPlaylist, *req_id)
            {
                tracing::debug!(req_id, "stale PlaylistExported response dropped");
                return false;
            }
            let name = state
                .app
                .playlists
                .iter()
                .find(|p| p.playlist_id == *playlist_id)
                .map(|p| p.name.clone())
                .unwrap_or_else(|| playlist_id.clone());
            state.app.playlists_status =
                format!("Exported {} tracks from \"{}\".", tracks.len(), name);
            state.app.exported = Some(ExportedPlaylist {
                name,
                tracks: tracks.clone(),
            });
            effects.emit_state(&state.app);
            true
        }
        ApiEvent::PlaylistImported { req_id, report } => {
            if !state
                .request_tracker
                .accept(&RequestKey::ImportPlaylist, *req_id)
            {
                tracing::debug!(req_id, "stale PlaylistImported response dropped");
                return false;
            }
            state.app.import_in_flight = false;
            let mut status = format!(
                "Imported {} tracks ({} failed).",
                report.success, report.failed
            );
            if !report.playlist_url.is_empty() {
                status.push(' ');
                status.push_str(&report.playlist_url);
            }
            state.app.playlists_status = status;
            effects.emit_state(&state.app);
            effects.toast("Playlist imported.");
            true
        }
        ApiEvent::Error { req_id, message } => {
            if state.request_tracker.accept(&RequestKey::Playlists, *req_id) {
                tracing::warn!(req_id, message = %message, "playlist fetch failed");
                state.app.playlists_loaded = false;
                state.app.playlists_status = format!("Failed to load playlists: {message}");
                effects.emit_state(&state.app);
                return true;
            }
            if state
                .request_tracker
                .accept(&RequestKey::ExportPlaylist, *req_id)
            {
                tracing::warn!(req_id, message = %message, "playlist export failed");
                state.app.playlists_status = format!("Export failed: {message}");
                effects.emit_state(&state.app);
                return true;
            }
            if state
                .request_tracker
                .accept(&RequestKey::ImportPlaylist, *req_id)
            {
                tracing::warn!(req_id, message = %message, "playlist import failed");
                state.app.import_in_flight = false;
                state.app.playlists_status = format!("Import failed: {message}");
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
    use crate::domain::model::{ImportReport, Platform, Playlist, Track};

    fn playlist(id: &str, name: &str) -> Playlist {
        Playlist {
            playlist_id: id.to_owned(),
            name: name.to_owned(),
            platform: Platform::Spotify,
            track_count: 3,
            description: None,
            cover_art_url: None,
        }
    }

    fn track(id: &str) -> Track {
        Track {
            track_id: id.to_owned(),
            track_name: "Song".to_owned(),
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

    async fn load_playlists(state: &mut CoreState, lists: Vec<Playlist>) {
        let mut effects = CoreEffects::default();
        enter(state, &mut effects);
        let mut effects = CoreEffects::default();
        let evt = ApiEvent::Playlists {
            req_id: state.req_id - 1,
            playlists: lists,
        };
        assert!(handle_api_event(&evt, state, &mut effects).await);
    }

    #[tokio::test]
    async fn enter_fetches_playlists_once() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        enter(&mut state, &mut effects);
        assert_eq!(state.app.playlists_status, "Loading playlists...");
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::FetchPlaylists { .. },
                ..
            }
        )));

        // Pending request blocks a second fetch.
        let mut effects = CoreEffects::default();
        enter(&mut state, &mut effects);
        assert!(effects.actions.is_empty());
    }

    #[tokio::test]
    async fn export_selected_sends_playlist_id() {
        let mut state = CoreState::new();
        load_playlists(
            &mut state,
            vec![playlist("p1", "Road Trip"), playlist("p2", "Focus")],
        )
        .await;
        state.app.playlists_selected = 1;

        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::PlaylistExportSelected,
            &mut state,
            &mut effects,
        )
        .await;

        assert_eq!(state.app.playlists_status, "Exporting \"Focus\"...");
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::ExportPlaylist { playlist_id, platform, .. },
                ..
            } if playlist_id == "p2" && platform == "spotify"
        )));
    }

    #[tokio::test]
    async fn export_result_is_kept_for_import() {
        let mut state = CoreState::new();
        load_playlists(&mut state, vec![playlist("p1", "Road Trip")]).await;

        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::PlaylistExportSelected,
            &mut state,
            &mut effects,
        )
        .await;

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::PlaylistExported {
            req_id: state.req_id - 1,
            playlist_id: "p1".to_owned(),
            tracks: vec![track("t1"), track("t2")],
        };
        assert!(handle_api_event(&evt, &mut state, &mut effects).await);

        let exported = state.app.exported.as_ref().expect("export kept");
        assert_eq!(exported.name, "Road Trip");
        assert_eq!(exported.tracks.len(), 2);
        assert_eq!(
            state.app.playlists_status,
            "Exported 2 tracks from \"Road Trip\"."
        );
    }

    #[tokio::test]
    async fn import_requires_a_prior_export() {
        let mut state = CoreState::new();
        let mut effects = CoreEffects::default();

        handle_ui(
            &AppCommand::PlaylistImportExported,
            &mut state,
            &mut effects,
        )
        .await;

        assert_eq!(
            state.app.playlists_status,
            "Export a playlist first, then import it."
        );
        assert!(!effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::ImportPlaylist { .. },
                ..
            }
        )));
    }

    #[tokio::test]
    async fn import_sends_exported_tracks_under_suffixed_name() {
        let mut state = CoreState::new();
        state.app.exported = Some(ExportedPlaylist {
            name: "Road Trip".to_owned(),
            tracks: vec![track("t1")],
        });

        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::PlaylistImportExported,
            &mut state,
            &mut effects,
        )
        .await;

        assert!(state.app.import_in_flight);
        assert!(effects.actions.iter().any(|effect| matches!(
            effect,
            CoreEffect::SendApi {
                cmd: ApiCommand::ImportPlaylist { playlist_name, tracks, .. },
                ..
            } if playlist_name == "Road Trip (Melodiary)" && tracks.len() == 1
        )));
    }

    #[tokio::test]
    async fn import_result_reports_counts_and_url() {
        let mut state = CoreState::new();
        state.app.exported = Some(ExportedPlaylist {
            name: "Road Trip".to_owned(),
            tracks: vec![track("t1")],
        });
        let mut effects = CoreEffects::default();
        handle_ui(
            &AppCommand::PlaylistImportExported,
            &mut state,
            &mut effects,
        )
        .await;

        let mut effects = CoreEffects::default();
        let evt = ApiEvent::PlaylistImported {
            req_id: state.req_id - 1,
            report: ImportReport {
                success: 9,
                failed: 1,
                playlist_url: "https://open.spotify.com/playlist/xyz".to_owned(),
            },
        };
        assert!(handle_api_event(&evt, &mut state, &mut effects).await);

        assert!(!state.app.import_in_flight);
        assert_eq!(
            state.app.playlists_status,
            "Imported 9 tracks (1 failed). https://open.spotify.com/playlist/xyz"
        );
    }

    #[tokio::test]
    async fn empty_playlist_list_shows_hint() {
        let mut state = CoreState::new();
        load_playlists(&mut state, vec![]).await;

        assert!(state.app.playlists_loaded);
        assert_eq!(state.app.playlists_status, "No playlists found on Spotify.");
    }
}

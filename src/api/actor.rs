use crate::api::models::{convert, dto};
use crate::api::{ApiError, MelodiaryClient, MelodiaryClientConfig};
use crate::domain::model::{
    AuthUser, ImportReport, PlatformConnection, Playlist, Preferences, SyncReport, Track,
    TrackPage, User,
};

use serde_json::Value;
use tokio::sync::mpsc;

async fn emit_error<E: std::fmt::Display>(
    tx_evt: &mpsc::Sender<ApiEvent>,
    req_id: u64,
    ctx: &'static str,
    err: E,
) {
    tracing::warn!(req_id, ctx, err = %err, "api request failed");
    let _ = tx_evt
        .send(ApiEvent::Error {
            req_id,
            message: err.to_string(),
        })
        .await;
}

/// Failed requests map to `Error`, except a rejected token which becomes
/// `SessionExpired` so the core can reset to the login view.
async fn emit_failure(
    tx_evt: &mpsc::Sender<ApiEvent>,
    req_id: u64,
    ctx: &'static str,
    err: ApiError,
) {
    if err.is_unauthorized() {
        tracing::info!(req_id, ctx, "session expired");
        let _ = tx_evt.send(ApiEvent::SessionExpired { req_id }).await;
    } else {
        emit_error(tx_evt, req_id, ctx, err).await;
    }
}

#[derive(Debug)]
pub enum ApiCommand {
    Init {
        req_id: u64,
    },
    FetchAuthUrl {
        req_id: u64,
    },
    ExchangeCode {
        req_id: u64,
        code: String,
    },
    Logout {
        req_id: u64,
    },
    FetchLibraryPage {
        req_id: u64,
        limit: u32,
        last_key: Option<String>,
    },
    DeleteTrack {
        req_id: u64,
        track_id: String,
    },
    SyncPlatform {
        req_id: u64,
        platform: String,
    },
    FetchProfile {
        req_id: u64,
    },
    UpdatePreferences {
        req_id: u64,
        preferences: Preferences,
    },
    FetchConnections {
        req_id: u64,
    },
    DisconnectPlatform {
        req_id: u64,
        platform: String,
    },
    FetchPlaylists {
        req_id: u64,
        platform: String,
    },
    ExportPlaylist {
        req_id: u64,
        platform: String,
        playlist_id: String,
    },
    ImportPlaylist {
        req_id: u64,
        target_platform: String,
        playlist_name: String,
        tracks: Vec<Track>,
    },
}

#[derive(Debug)]
pub enum ApiEvent {
    ClientReady {
        req_id: u64,
        authenticated: bool,
        user_id: Option<String>,
    },
    AuthUrl {
        req_id: u64,
        url: String,
    },
    SessionEstablished {
        req_id: u64,
        user: AuthUser,
    },
    LoggedOut {
        req_id: u64,
    },
    LibraryPage {
        req_id: u64,
        page: TrackPage,
    },
    TrackDeleted {
        req_id: u64,
        track_id: String,
    },
    SyncFinished {
        req_id: u64,
        report: SyncReport,
    },
    Profile {
        req_id: u64,
        user: Box<User>,
    },
    Connections {
        req_id: u64,
        connections: Vec<PlatformConnection>,
    },
    PlatformDisconnected {
        req_id: u64,
        platform: String,
    },
    Playlists {
        req_id: u64,
        playlists: Vec<Playlist>,
    },
    PlaylistExported {
        req_id: u64,
        playlist_id: String,
        tracks: Vec<Track>,
    },
    PlaylistImported {
        req_id: u64,
        report: ImportReport,
    },
    SessionExpired {
        req_id: u64,
    },
    Error {
        req_id: u64,
        message: String,
    },
}

pub fn spawn_api_actor(
    cfg: MelodiaryClientConfig,
) -> (mpsc::Sender<ApiCommand>, mpsc::Receiver<ApiEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<ApiCommand>(64);
    let (tx_evt, rx_evt) = mpsc::channel::<ApiEvent>(64);

    tokio::spawn(async move {
        let mut client = match MelodiaryClient::new(cfg) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(err = %e, "failed to initialize MelodiaryClient");
                let _ = tx_evt
                    .send(ApiEvent::Error {
                        req_id: 0,
                        message: format!("client init failed: {e}"),
                    })
                    .await;
                return;
            }
        };

        while let Some(cmd) = rx_cmd.recv().await {
            match cmd {
                ApiCommand::Init { req_id } => {
                    let _ = tx_evt
                        .send(ApiEvent::ClientReady {
                            req_id,
                            authenticated: client.is_authenticated(),
                            user_id: client.session.user_id.clone(),
                        })
                        .await;
                }
                ApiCommand::FetchAuthUrl { req_id } => match client.spotify_auth_url().await {
                    Ok(v) => match parse::<dto::AuthUrlResp>(v) {
                        Ok(resp) => {
                            let _ = tx_evt
                                .send(ApiEvent::AuthUrl {
                                    req_id,
                                    url: resp.auth_url,
                                })
                                .await;
                        }
                        Err(e) => {
                            emit_error(&tx_evt, req_id, "FetchAuthUrl(parse)", e).await;
                        }
                    },
                    Err(e) => {
                        emit_failure(&tx_evt, req_id, "FetchAuthUrl(request)", e).await;
                    }
                },
                ApiCommand::ExchangeCode { req_id, code } => {
                    match client.spotify_callback(&code).await {
                        Ok(v) => match parse::<dto::CallbackResp>(v) {
                            Ok(resp) => {
                                if let Err(e) =
                                    client.store_session(&resp.token, &resp.user.user_id)
                                {
                                    emit_error(&tx_evt, req_id, "ExchangeCode(persist)", e).await;
                                } else {
                                    let _ = tx_evt
                                        .send(ApiEvent::SessionEstablished {
                                            req_id,
                                            user: convert::to_auth_user(resp.user),
                                        })
                                        .await;
                                }
                            }
                            Err(e) => {
                                emit_error(&tx_evt, req_id, "ExchangeCode(parse)", e).await;
                            }
                        },
                        Err(e) => {
                            emit_failure(&tx_evt, req_id, "ExchangeCode(request)", e).await;
                        }
                    }
                }
                ApiCommand::Logout { req_id } => match client.clear_session() {
                    Ok(()) => {
                        let _ = tx_evt.send(ApiEvent::LoggedOut { req_id }).await;
                    }
                    Err(e) => {
                        emit_error(&tx_evt, req_id, "Logout", e).await;
                    }
                },
                ApiCommand::FetchLibraryPage {
                    req_id,
                    limit,
                    last_key,
                } => match client.library_page(limit, last_key.as_deref()).await {
                    Ok(v) => {
                        match parse::<dto::LibraryPageResp>(v).and_then(convert::to_track_page) {
                            Ok(page) => {
                                let _ =
                                    tx_evt.send(ApiEvent::LibraryPage { req_id, page }).await;
                            }
                            Err(e) => {
                                emit_error(&tx_evt, req_id, "FetchLibraryPage(parse)", e).await;
                            }
                        }
                    }
                    Err(e) => {
                        emit_failure(&tx_evt, req_id, "FetchLibraryPage(request)", e).await;
                    }
                },
                ApiCommand::DeleteTrack { req_id, track_id } => {
                    match client.delete_track(&track_id).await {
                        Ok(_) => {
                            let _ = tx_evt
                                .send(ApiEvent::TrackDeleted { req_id, track_id })
                                .await;
                        }
                        Err(e) => {
                            emit_failure(&tx_evt, req_id, "DeleteTrack(request)", e).await;
                        }
                    }
                }
                ApiCommand::SyncPlatform { req_id, platform } => {
                    match client.sync_platform(&platform).await {
                        Ok(v) => match parse::<dto::SyncResp>(v) {
                            Ok(resp) => {
                                let report = convert::to_sync_report(resp);
                                let _ = tx_evt
                                    .send(ApiEvent::SyncFinished { req_id, report })
                                    .await;
                            }
                            Err(e) => {
                                emit_error(&tx_evt, req_id, "SyncPlatform(parse)", e).await;
                            }
                        },
                        Err(e) => {
                            emit_failure(&tx_evt, req_id, "SyncPlatform(request)", e).await;
                        }
                    }
                }
                ApiCommand::FetchProfile { req_id } => match client.profile().await {
                    Ok(v) => match parse::<dto::UserResp>(v) {
                        Ok(resp) => {
                            let user = Box::new(convert::to_user(resp));
                            let _ = tx_evt.send(ApiEvent::Profile { req_id, user }).await;
                        }
                        Err(e) => {
                            emit_error(&tx_evt, req_id, "FetchProfile(parse)", e).await;
                        }
                    },
                    Err(e) => {
                        emit_failure(&tx_evt, req_id, "FetchProfile(request)", e).await;
                    }
                },
                ApiCommand::UpdatePreferences {
                    req_id,
                    preferences,
                } => {
                    let body = convert::preferences_to_body(&preferences);
                    match client.update_preferences(&body).await {
                        Ok(v) => match parse::<dto::UserResp>(v) {
                            Ok(resp) => {
                                let user = Box::new(convert::to_user(resp));
                                let _ = tx_evt.send(ApiEvent::Profile { req_id, user }).await;
                            }
                            Err(e) => {
                                emit_error(&tx_evt, req_id, "UpdatePreferences(parse)", e).await;
                            }
                        },
                        Err(e) => {
                            emit_failure(&tx_evt, req_id, "UpdatePreferences(request)", e).await;
                        }
                    }
                }
                ApiCommand::FetchConnections { req_id } => match client.connections().await {
                    Ok(v) => match parse::<Vec<dto::ConnectionInfo>>(v) {
                        Ok(items) => {
                            let connections = convert::to_connections(items);
                            let _ = tx_evt
                                .send(ApiEvent::Connections {
                                    req_id,
                                    connections,
                                })
                                .await;
                        }
                        Err(e) => {
                            emit_error(&tx_evt, req_id, "FetchConnections(parse)", e).await;
                        }
                    },
                    Err(e) => {
                        emit_failure(&tx_evt, req_id, "FetchConnections(request)", e).await;
                    }
                },
                ApiCommand::DisconnectPlatform { req_id, platform } => {
                    match client.disconnect_platform(&platform).await {
                        Ok(_) => {
                            let _ = tx_evt
                                .send(ApiEvent::PlatformDisconnected { req_id, platform })
                                .await;
                        }
                        Err(e) => {
                            emit_failure(&tx_evt, req_id, "DisconnectPlatform(request)", e).await;
                        }
                    }
                }
                ApiCommand::FetchPlaylists { req_id, platform } => {
                    match client.playlists(&platform).await {
                        Ok(v) => match parse::<Vec<dto::PlaylistInfo>>(v) {
                            Ok(items) => {
                                let playlists = convert::to_playlists(items);
                                let _ = tx_evt
                                    .send(ApiEvent::Playlists { req_id, playlists })
                                    .await;
                            }
                            Err(e) => {
                                emit_error(&tx_evt, req_id, "FetchPlaylists(parse)", e).await;
                            }
                        },
                        Err(e) => {
                            emit_failure(&tx_evt, req_id, "FetchPlaylists(request)", e).await;
                        }
                    }
                }
                ApiCommand::ExportPlaylist {
                    req_id,
                    platform,
                    playlist_id,
                } => match client.export_playlist(&platform, &playlist_id).await {
                    Ok(v) => match parse::<Vec<dto::TrackInfo>>(v) {
                        Ok(items) => {
                            let tracks = convert::to_tracks(items);
                            let _ = tx_evt
                                .send(ApiEvent::PlaylistExported {
                                    req_id,
                                    playlist_id,
                                    tracks,
                                })
                                .await;
                        }
                        Err(e) => {
                            emit_error(&tx_evt, req_id, "ExportPlaylist(parse)", e).await;
                        }
                    },
                    Err(e) => {
                        emit_failure(&tx_evt, req_id, "ExportPlaylist(request)", e).await;
                    }
                },
                ApiCommand::ImportPlaylist {
                    req_id,
                    target_platform,
                    playlist_name,
                    tracks,
                } => {
                    let bodies: Vec<dto::TrackBody> =
                        tracks.iter().map(convert::track_to_body).collect();
                    match client
                        .import_playlist(&target_platform, &playlist_name, &bodies)
                        .await
                    {
                        Ok(v) => match parse::<dto::ImportResp>(v) {
                            Ok(resp) => {
                                let report = convert::to_import_report(resp);
                                let _ = tx_evt
                                    .send(ApiEvent::PlaylistImported { req_id, report })
                                    .await;
                            }
                            Err(e) => {
                                emit_error(&tx_evt, req_id, "ImportPlaylist(parse)", e).await;
                            }
                        },
                        Err(e) => {
                            emit_failure(&tx_evt, req_id, "ImportPlaylist(request)", e).await;
                        }
                    }
                }
            }
        }
    });

    (tx_cmd, rx_evt)
}

fn parse<T: serde::de::DeserializeOwned>(v: Value) -> Result<T, convert::ModelError> {
    serde_json::from_value(v).map_err(convert::ModelError::BadJson)
}

use chrono::{DateTime, Utc};

use crate::domain::model::{
    AuthUser, ImportReport, NotificationFrequency, Platform, PlatformConnection, Playlist,
    Preferences, SyncReport, Theme, Track, TrackPage, User,
};

use super::dto::{
    AuthUserInfo, ConnectionInfo, ImportResp, LibraryPageResp, PlaylistInfo, PreferencesBody,
    PreferencesInfo, SyncResp, TrackBody, TrackInfo, UserResp,
};

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("bad response: {0}")]
    BadJson(#[from] serde_json::Error),
}

pub fn platform_from_string(s: &str) -> Platform {
    match s {
        "spotify" => Platform::Spotify,
        "manual" => Platform::Manual,
        other => Platform::Other(other.to_owned()),
    }
}

pub fn platform_to_string(p: &Platform) -> String {
    match p {
        Platform::Spotify => "spotify".to_owned(),
        Platform::Manual => "manual".to_owned(),
        Platform::Other(s) => s.clone(),
    }
}

/// Dates arrive as RFC 3339 strings; anything else renders as "unknown"
/// rather than failing the row.
fn parse_date(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

pub fn to_track(info: TrackInfo) -> Track {
    let platform = if info.platform.is_empty() {
        if info.is_manual {
            Platform::Manual
        } else {
            Platform::Spotify
        }
    } else {
        platform_from_string(&info.platform)
    };
    Track {
        track_id: info.track_id,
        track_name: info.track_name,
        artist_name: info.artist_name,
        album_name: info.album_name,
        platform,
        platform_track_id: info.platform_track_id,
        platform_album_id: info.platform_album_id,
        platform_artist_id: info.platform_artist_id,
        cover_art_url: info.cover_art_url,
        added_at: info.added_date.as_deref().and_then(parse_date),
        is_manual: info.is_manual,
        duration: info.duration,
        release_year: info.release_year,
        genre: info.genre,
        notes: info.notes,
    }
}

pub fn to_tracks(items: Vec<TrackInfo>) -> Vec<Track> {
    items.into_iter().map(to_track).collect()
}

/// The backend's `lastKey` is an arbitrary JSON object. We keep it as a
/// string and hand it back verbatim on the next page request.
pub fn to_track_page(resp: LibraryPageResp) -> Result<TrackPage, ModelError> {
    let cursor = match resp.last_key {
        Some(v) => Some(serde_json::to_string(&v)?),
        None => None,
    };
    Ok(TrackPage {
        items: to_tracks(resp.items),
        count: resp.count,
        cursor,
    })
}

pub fn to_auth_user(info: AuthUserInfo) -> AuthUser {
    AuthUser {
        user_id: info.user_id,
        email: info.email,
        display_name: info.display_name,
    }
}

pub fn to_user(resp: UserResp) -> User {
    User {
        user_id: resp.user_id,
        email: resp.email,
        display_name: resp.display_name,
        created_at: resp.created_at.as_deref().and_then(parse_date),
        has_real_email: resp.has_real_email,
        spotify_id: resp.spotify_id,
        preferences: to_preferences(resp.preferences),
    }
}

pub fn to_preferences(info: Option<PreferencesInfo>) -> Preferences {
    let Some(info) = info else {
        return Preferences::default();
    };
    Preferences {
        email_notifications: info.email_notifications,
        notification_frequency: frequency_from_string(&info.notification_frequency),
        email_address: info.email_address,
        theme: info.theme.as_deref().and_then(theme_from_string),
    }
}

pub fn frequency_from_string(s: &str) -> NotificationFrequency {
    match s {
        "weekly" => NotificationFrequency::Weekly,
        "never" => NotificationFrequency::Never,
        _ => NotificationFrequency::Daily,
    }
}

pub fn frequency_to_string(f: NotificationFrequency) -> String {
    match f {
        NotificationFrequency::Daily => "daily",
        NotificationFrequency::Weekly => "weekly",
        NotificationFrequency::Never => "never",
    }
    .to_owned()
}

pub fn theme_from_string(s: &str) -> Option<Theme> {
    match s {
        "light" => Some(Theme::Light),
        "dark" => Some(Theme::Dark),
        "auto" => Some(Theme::Auto),
        _ => None,
    }
}

pub fn theme_to_string(t: Theme) -> String {
    match t {
        Theme::Light => "light",
        Theme::Dark => "dark",
        Theme::Auto => "auto",
    }
    .to_owned()
}

pub fn to_connections(items: Vec<ConnectionInfo>) -> Vec<PlatformConnection> {
    items
        .into_iter()
        .map(|c| PlatformConnection {
            platform: platform_from_string(&c.platform),
            connected: c.connected,
            connected_at: c.connected_at.as_deref().and_then(parse_date),
            display_name: c.display_name,
            profile_url: c.profile_url,
            platform_user_id: c.platform_user_id,
        })
        .collect()
}

pub fn to_playlists(items: Vec<PlaylistInfo>) -> Vec<Playlist> {
    items
        .into_iter()
        .map(|p| Playlist {
            playlist_id: p.playlist_id,
            name: p.name,
            platform: platform_from_string(&p.platform),
            track_count: p.track_count,
            description: p.description,
            cover_art_url: p.cover_art_url,
        })
        .collect()
}

pub fn to_sync_report(resp: SyncResp) -> SyncReport {
    SyncReport {
        synced: resp.synced,
        malformed: resp.malformed,
        message: resp.message,
    }
}

pub fn to_import_report(resp: ImportResp) -> ImportReport {
    ImportReport {
        success: resp.success,
        failed: resp.failed,
        playlist_url: resp.playlist_url,
    }
}

pub fn track_to_body(t: &Track) -> TrackBody {
    TrackBody {
        track_id: t.track_id.clone(),
        track_name: t.track_name.clone(),
        artist_name: t.artist_name.clone(),
        album_name: t.album_name.clone(),
        platform: platform_to_string(&t.platform),
        platform_track_id: t.platform_track_id.clone(),
        platform_album_id: t.platform_album_id.clone(),
        platform_artist_id: t.platform_artist_id.clone(),
        cover_art_url: t.cover_art_url.clone(),
        added_date: t.added_at.map(|d| d.to_rfc3339()),
        is_manual: t.is_manual,
        duration: t.duration,
        release_year: t.release_year,
        genre: t.genre.clone(),
        notes: t.notes.clone(),
    }
}

pub fn preferences_to_body(p: &Preferences) -> PreferencesBody {
    PreferencesBody {
        email_notifications: p.email_notifications,
        notification_frequency: frequency_to_string(p.notification_frequency),
        email_address: p.email_address.clone(),
        theme: p.theme.map(theme_to_string),
    }
}

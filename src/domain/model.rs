use chrono::{DateTime, Utc};

/// Streaming platform a track or connection belongs to.
///
/// `Other` keeps unknown values readable instead of failing the whole
/// response when the backend adds a platform before we do.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Platform {
    Spotify,
    Manual,
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    pub platform: Platform,
    pub platform_track_id: Option<String>,
    pub platform_album_id: Option<String>,
    pub platform_artist_id: Option<String>,
    pub cover_art_url: Option<String>,
    pub added_at: Option<DateTime<Utc>>,
    pub is_manual: bool,
    pub duration: Option<i64>,
    pub release_year: Option<i32>,
    pub genre: Option<String>,
    pub notes: Option<String>,
}

/// One page of the aggregated library.
#[derive(Debug, Clone, Default)]
pub struct TrackPage {
    pub items: Vec<Track>,
    pub count: u64,
    /// Opaque continuation cursor; `None` means the last page.
    pub cursor: Option<String>,
}

/// Minimal identity returned by the OAuth code exchange.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
}

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub display_name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub has_real_email: bool,
    pub spotify_id: Option<String>,
    pub preferences: Preferences,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Preferences {
    pub email_notifications: bool,
    pub notification_frequency: NotificationFrequency,
    pub email_address: Option<String>,
    pub theme: Option<Theme>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            email_notifications: true,
            notification_frequency: NotificationFrequency::Daily,
            email_address: None,
            theme: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationFrequency {
    Daily,
    Weekly,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

#[derive(Debug, Clone)]
pub struct PlatformConnection {
    pub platform: Platform,
    pub connected: bool,
    pub connected_at: Option<DateTime<Utc>>,
    pub display_name: Option<String>,
    pub profile_url: Option<String>,
    pub platform_user_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Playlist {
    pub playlist_id: String,
    pub name: String,
    pub platform: Platform,
    pub track_count: i64,
    pub description: Option<String>,
    pub cover_art_url: Option<String>,
}

/// Outcome of a platform library sync.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub synced: u64,
    pub malformed: u64,
    pub message: String,
}

/// Outcome of importing tracks into a platform playlist.
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub success: u64,
    pub failed: u64,
    pub playlist_url: String,
}

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ========== Inbound ==========

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUrlResp {
    pub auth_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallbackResp {
    pub token: String,
    pub user: AuthUserInfo,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthUserInfo {
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LibraryPageResp {
    #[serde(default)]
    pub items: Vec<TrackInfo>,
    #[serde(default)]
    pub count: u64,
    /// Raw DynamoDB-style continuation key; opaque to the client.
    #[serde(default)]
    pub last_key: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackInfo {
    pub track_id: String,
    pub track_name: String,
    #[serde(default)]
    pub artist_name: String,
    #[serde(default)]
    pub album_name: String,
    #[serde(default)]
    pub platform: String,
    pub platform_track_id: Option<String>,
    pub platform_album_id: Option<String>,
    pub platform_artist_id: Option<String>,
    pub cover_art_url: Option<String>,
    pub added_date: Option<String>,
    #[serde(default)]
    pub is_manual: bool,
    pub duration: Option<i64>,
    pub release_year: Option<i32>,
    pub genre: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SyncResp {
    #[serde(default)]
    pub synced: u64,
    #[serde(default)]
    pub malformed: u64,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResp {
    pub user_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub display_name: String,
    pub created_at: Option<String>,
    #[serde(default)]
    pub has_real_email: bool,
    pub spotify_id: Option<String>,
    pub preferences: Option<PreferencesInfo>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesInfo {
    #[serde(default)]
    pub email_notifications: bool,
    #[serde(default)]
    pub notification_frequency: String,
    pub email_address: Option<String>,
    pub theme: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionInfo {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub connected: bool,
    pub connected_at: Option<String>,
    pub display_name: Option<String>,
    pub profile_url: Option<String>,
    pub platform_user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistInfo {
    pub playlist_id: String,
    pub name: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub track_count: i64,
    pub description: Option<String>,
    pub cover_art_url: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResp {
    #[serde(default)]
    pub success: u64,
    #[serde(default)]
    pub failed: u64,
    #[serde(default)]
    pub playlist_url: String,
}

/// Error payload shape shared by all endpoints.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: Option<String>,
    pub message: Option<String>,
}

// ========== Outbound ==========

/// Full track representation as the backend expects it (playlist import).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackBody {
    pub track_id: String,
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_track_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_album_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_artist_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_art_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub added_date: Option<String>,
    pub is_manual: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for POST /library/manual; the backend fills in id, platform and date.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTrackBody {
    pub track_name: String,
    pub artist_name: String,
    pub album_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover_art_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub release_year: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferencesBody {
    pub email_notifications: bool,
    pub notification_frequency: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

mod config;
mod error;

pub use config::{
    MelodiaryClientConfig, SessionState, clear_session, load_session, save_session, session_path,
};
pub use error::ApiError;

use crate::api::models::dto;
use reqwest::{Method, StatusCode};
use serde_json::{Value, json};
use std::fs;
use std::time::Duration;
use urlencoding::encode;

/// Whether a request carries the stored bearer token. The two OAuth
/// endpoints are the only public ones.
#[derive(Debug, Clone, Copy)]
enum Auth {
    Public,
    Bearer,
}

#[derive(Debug)]
pub struct MelodiaryClient {
    http: reqwest::Client,
    pub cfg: MelodiaryClientConfig,
    pub session: SessionState,
}

impl MelodiaryClient {
    pub fn new(cfg: MelodiaryClientConfig) -> Result<Self, ApiError> {
        fs::create_dir_all(&cfg.data_dir).map_err(ApiError::Io)?;

        let http = reqwest::Client::builder()
            .user_agent("melodiary-tui")
            .timeout(Duration::from_secs(cfg.http_timeout_secs))
            .build()
            .map_err(ApiError::Http)?;

        Ok(Self {
            http,
            session: config::load_session(&cfg.data_dir),
            cfg,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    /// Persist the token from a completed code exchange.
    pub fn store_session(&mut self, token: &str, user_id: &str) -> Result<(), ApiError> {
        self.session.token = Some(token.to_owned());
        self.session.user_id = Some(user_id.to_owned());
        config::save_session(&self.cfg.data_dir, &self.session)
    }

    /// Forget the session in memory and on disk.
    pub fn clear_session(&mut self) -> Result<(), ApiError> {
        self.session = SessionState::default();
        config::clear_session(&self.cfg.data_dir)
    }

    // ========== Auth ==========

    pub async fn spotify_auth_url(&mut self) -> Result<Value, ApiError> {
        self.request(Method::GET, "/auth/spotify/login", &[], None, Auth::Public)
            .await
    }

    pub async fn spotify_callback(&mut self, code: &str) -> Result<Value, ApiError> {
        self.request(
            Method::POST,
            "/auth/spotify/callback",
            &[],
            Some(json!({ "code": code })),
            Auth::Public,
        )
        .await
    }

    // ========== Library ==========

    pub async fn library_page(
        &mut self,
        limit: u32,
        last_key: Option<&str>,
    ) -> Result<Value, ApiError> {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(k) = last_key {
            query.push(("lastKey", k.to_owned()));
        }
        self.request(Method::GET, "/library", &query, None, Auth::Bearer)
            .await
    }

    pub async fn add_manual_track(&mut self, track: &dto::NewTrackBody) -> Result<Value, ApiError> {
        let body = serde_json::to_value(track).map_err(ApiError::Serde)?;
        self.request(Method::POST, "/library/manual", &[], Some(body), Auth::Bearer)
            .await
    }

    pub async fn delete_track(&mut self, track_id: &str) -> Result<Value, ApiError> {
        let path = format!("/library/{}", encode(track_id));
        self.request(Method::DELETE, &path, &[], None, Auth::Bearer)
            .await
    }

    pub async fn sync_platform(&mut self, platform: &str) -> Result<Value, ApiError> {
        let path = format!("/library/sync/{}", encode(platform));
        self.request(Method::POST, &path, &[], None, Auth::Bearer)
            .await
    }

    // ========== User ==========

    pub async fn profile(&mut self) -> Result<Value, ApiError> {
        self.request(Method::GET, "/user/profile", &[], None, Auth::Bearer)
            .await
    }

    pub async fn update_preferences(
        &mut self,
        preferences: &dto::PreferencesBody,
    ) -> Result<Value, ApiError> {
        let body = serde_json::to_value(preferences).map_err(ApiError::Serde)?;
        self.request(Method::PUT, "/user/preferences", &[], Some(body), Auth::Bearer)
            .await
    }

    pub async fn connections(&mut self) -> Result<Value, ApiError> {
        self.request(Method::GET, "/user/connections", &[], None, Auth::Bearer)
            .await
    }

    pub async fn disconnect_platform(&mut self, platform: &str) -> Result<Value, ApiError> {
        let path = format!("/user/connections/{}", encode(platform));
        self.request(Method::DELETE, &path, &[], None, Auth::Bearer)
            .await
    }

    // ========== Playlists ==========

    pub async fn playlists(&mut self, platform: &str) -> Result<Value, ApiError> {
        let path = format!("/playlists/{}", encode(platform));
        self.request(Method::GET, &path, &[], None, Auth::Bearer)
            .await
    }

    pub async fn export_playlist(
        &mut self,
        platform: &str,
        playlist_id: &str,
    ) -> Result<Value, ApiError> {
        let path = format!(
            "/playlists/{}/{}/export",
            encode(platform),
            encode(playlist_id)
        );
        self.request(Method::GET, &path, &[], None, Auth::Bearer)
            .await
    }

    pub async fn import_playlist(
        &mut self,
        target_platform: &str,
        playlist_name: &str,
        tracks: &[dto::TrackBody],
    ) -> Result<Value, ApiError> {
        let path = format!("/playlists/{}/import", encode(target_platform));
        self.request(
            Method::POST,
            &path,
            &[],
            Some(json!({ "playlistName": playlist_name, "tracks": tracks })),
            Auth::Bearer,
        )
        .await
    }

    async fn request(
        &mut self,
        method: Method,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<Value>,
        auth: Auth,
    ) -> Result<Value, ApiError> {
        let url = format!("{}{}", self.cfg.base_url.trim_end_matches('/'), path);
        let mut req = self.http.request(method, &url);
        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        if matches!(auth, Auth::Bearer)
            && let Some(token) = &self.session.token
        {
            req = req.bearer_auth(token);
        }

        let resp = req.send().await.map_err(ApiError::Http)?;
        let status = resp.status();

        if status == StatusCode::UNAUTHORIZED {
            tracing::info!(url = %url, "token rejected, dropping stored session");
            self.clear_session()?;
            return Err(ApiError::Unauthorized);
        }

        let bytes = resp.bytes().await.map_err(ApiError::Http)?;
        if !status.is_success() {
            let message = serde_json::from_slice::<dto::ErrorBody>(&bytes)
                .ok()
                .and_then(|b| b.error.or(b.message))
                .unwrap_or_else(|| format!("request failed with status {status}"));
            return Err(ApiError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        if bytes.is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&bytes).map_err(ApiError::Serde)
    }
}

use super::error::ApiError;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct MelodiaryClientConfig {
    pub base_url: String,
    pub data_dir: PathBuf,
    pub http_timeout_secs: u64,
}

impl Default for MelodiaryClientConfig {
    fn default() -> Self {
        let data_dir = ProjectDirs::from("dev", "melodiary", "melodiary-tui")
            .map(|p| p.data_local_dir().to_path_buf())
            .unwrap_or_else(|| std::env::temp_dir().join("melodiary-tui"));
        Self {
            base_url: "http://127.0.0.1:3000".to_owned(),
            data_dir,
            http_timeout_secs: 30,
        }
    }
}

/// Persisted authentication state (bearer token plus the user it belongs to).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub token: Option<String>,
    pub user_id: Option<String>,
}

impl SessionState {
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

pub fn session_path(data_dir: &Path) -> PathBuf {
    data_dir.join("session.json")
}

/// An unreadable or corrupt session file degrades to "signed out" rather
/// than blocking startup.
pub fn load_session(data_dir: &Path) -> SessionState {
    let p = session_path(data_dir);
    if !p.exists() {
        return SessionState::default();
    }
    let Ok(bytes) = fs::read(&p) else {
        tracing::warn!(path = %p.display(), "session file unreadable, starting signed out");
        return SessionState::default();
    };
    match serde_json::from_slice(&bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(err = %e, "session file corrupt, starting signed out");
            SessionState::default()
        }
    }
}

pub fn save_session(data_dir: &Path, session: &SessionState) -> Result<(), ApiError> {
    fs::create_dir_all(data_dir).map_err(ApiError::Io)?;
    let p = session_path(data_dir);
    let tmp = p.with_extension("json.tmp");
    let bytes = serde_json::to_vec_pretty(session).map_err(ApiError::Serde)?;
    fs::write(&tmp, bytes).map_err(ApiError::Io)?;
    if let Err(e) = fs::rename(&tmp, &p) {
        let _ = fs::remove_file(&p);
        fs::rename(&tmp, &p).map_err(|_| ApiError::Io(e))?;
    }
    Ok(())
}

pub fn clear_session(data_dir: &Path) -> Result<(), ApiError> {
    let p = session_path(data_dir);
    match fs::remove_file(&p) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(ApiError::Io(e)),
    }
}

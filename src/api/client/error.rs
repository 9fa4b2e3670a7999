#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Http(reqwest::Error),
    #[error("io error: {0}")]
    Io(std::io::Error),
    #[error("bad response body: {0}")]
    Serde(serde_json::Error),
    /// Non-2xx reply carrying the backend's own error payload.
    #[error("{message}")]
    Backend { status: u16, message: String },
    /// Token rejected; the stored session has already been dropped.
    #[error("session expired, please sign in again")]
    Unauthorized,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

//! Application-level errors.

use crate::api::ApiError;

/// Top-level error type for the binary entry points.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("json error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Backend API error
    #[error("api error: {0}")]
    Api(#[from] ApiError),

    /// Anything else
    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_display() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = AppError::Io(io_err);
        assert!(err.to_string().contains("io error"));
    }

    #[test]
    fn test_api_error_wraps_backend_message() {
        let err = AppError::Api(ApiError::Backend {
            status: 500,
            message: "Failed to retrieve library".to_owned(),
        });
        assert!(err.to_string().contains("Failed to retrieve library"));
    }

    #[test]
    fn test_error_chain() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "test");
        let app_err = AppError::Io(io_err);

        use std::error::Error;
        assert!(app_err.source().is_some());
    }
}

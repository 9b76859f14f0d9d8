//! Error types for the orgdrive service

use thiserror::Error;

/// Result type alias for orgdrive operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Organization '{0}' already exists in the target drive")]
    DuplicateOrganization(String),

    #[error("Operation failed: {0}")]
    Other(String),
}

/// Drive API errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Authentication with the Drive API failed")]
    Unauthorized,

    #[error("Access denied. The service account cannot access this resource.")]
    Forbidden,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Access token expired or invalid")]
    InvalidToken,
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Network("Request timed out".to_string())
        } else if err.is_connect() {
            ApiError::Network("Failed to connect to API".to_string())
        } else {
            ApiError::Network(err.to_string())
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GOOGLE_SHARED_DRIVE_ID environment variable is not set")]
    MissingDriveId,

    #[error("GOOGLE_SERVICE_ACCOUNT_JSON environment variable is not set")]
    MissingCredentials,

    #[error("Failed to load service account credentials: {0}")]
    InvalidCredentials(String),
}

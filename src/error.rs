//! Error types for the hostfacet enumeration core.

use thiserror::Error;

/// Paging-argument validation errors
///
/// Raised before any backend call is made; a rejected argument aborts the
/// whole enumeration rather than producing a partial or empty result.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Limit must be between 0 and {max}, got {value}")]
    LimitOutOfRange { value: i64, max: i64 },

    #[error("Offset must be non-negative, got {value}")]
    NegativeOffset { value: i64 },
}

/// Query execution service errors
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Backend returned status {status}: {body}")]
    BackendError { status: u16, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Client setup failed: {0}")]
    ClientError(String),
}

/// Enumeration errors
///
/// All variants abort the single enumeration call; none are caught or
/// downgraded internally.
#[derive(Debug, Error)]
pub enum EnumerationError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Search error: {0}")]
    Search(#[from] SearchError),

    #[error("Conversion failed for key '{key}': {source}")]
    Conversion { key: String, source: anyhow::Error },
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadFailed(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

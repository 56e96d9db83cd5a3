//! Error types for the index.

use thiserror::Error;

/// Errors surfaced by index operations.
#[derive(Debug, Error)]
pub enum GeoKdError {
    /// No populated generation exists: the index was never rebuilt, or the
    /// last rebuild was given no points.
    #[error("index uninitialized")]
    UninitializedIndex,

    /// Configuration was parsed but failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be parsed.
    #[error("failed to parse configuration: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for GeoKdError {
    fn from(err: serde_json::Error) -> Self {
        GeoKdError::Config(err.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for GeoKdError {
    fn from(err: toml::de::Error) -> Self {
        GeoKdError::Config(err.to_string())
    }
}

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, GeoKdError>;

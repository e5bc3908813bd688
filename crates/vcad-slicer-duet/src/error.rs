//! Error types for Duet instance management.

use thiserror::Error;

/// Errors from the Duet instance registry and its preference stores.
#[derive(Error, Debug)]
pub enum DuetError {
    /// Persisted instance data is not a valid instance map.
    #[error("malformed instance data: {0}")]
    Parse(String),

    /// No instance is registered under this name.
    #[error("unknown instance: {0}")]
    UnknownInstance(String),

    /// The preference store could not be read or written.
    #[error("preference store error: {0}")]
    Preferences(String),

    /// Invalid registry configuration.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// JSON error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Duet instance operations.
pub type Result<T> = std::result::Result<T, DuetError>;

//! Error types for Flippyflap

use thiserror::Error;

/// The main error type for Flippyflap
#[derive(Debug, Error)]
pub enum Error {
    #[error("Cannot set {field} once the configuration is locked")]
    ConfigLocked { field: &'static str },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to load resource '{name}': {reason}")]
    Resource { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Flippyflap operations
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn resource(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Resource {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

use thiserror::Error;

/// Unified error type for autotag operations
#[derive(Error, Debug)]
pub enum AutotagError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version extraction failed: {0}")]
    Extraction(String),

    #[error("Invalid version pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Remote operation failed: {0}")]
    Remote(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in autotag
pub type Result<T> = std::result::Result<T, AutotagError>;

impl AutotagError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        AutotagError::Config(msg.into())
    }

    /// Create an extraction error with context
    pub fn extraction(msg: impl Into<String>) -> Self {
        AutotagError::Extraction(msg.into())
    }

    /// Create a remote error with context
    pub fn remote(msg: impl Into<String>) -> Self {
        AutotagError::Remote(msg.into())
    }
}

//! Error types for the tally_core library.

use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for tally_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Profile store error
    #[error("Store error: {0}")]
    Store(String),

    /// No profile exists for the given user
    #[error("no profile found for user {user_id}; set up a profile first")]
    ProfileNotFound { user_id: i64 },

    /// Malformed caller input
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

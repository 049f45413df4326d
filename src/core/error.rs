//! Error types for the Wayfarer world core

use thiserror::Error;

/// Main error type for the crate
///
/// Runtime queries (height lookups, environment derivation, proximity checks)
/// never fail; errors are raised once, while a world is being configured.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for building an [`Error::InvalidConfig`].
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

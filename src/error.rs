//! Error types for the tagmap layout engine.

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, TagMapError>;

#[derive(Debug, Error)]
pub enum TagMapError {
    /// Extraction or layout was requested before any dataset was loaded.
    #[error("tag map not initialized: {0}")]
    NotInitialized(String),

    /// Visualization or clustering parameters violate their contract.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// A record could not be accepted.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("failed to parse configuration: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "toml")]
    #[error("failed to parse TOML configuration: {0}")]
    Toml(#[from] toml::de::Error),
}

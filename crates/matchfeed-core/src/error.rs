//! Error types for the feed service
//!
//! Serving a feed never fails; only configuration can.

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Document is not valid TOML for the configuration shape
    #[error("invalid configuration document: {0}")]
    Parse(#[from] toml::de::Error),

    /// Document parsed but violates an invariant
    #[error("invalid configuration: {0}")]
    Invalid(String),

    /// Tracing subscriber could not be installed
    #[error("tracing initialisation failed: {0}")]
    Tracing(String),
}

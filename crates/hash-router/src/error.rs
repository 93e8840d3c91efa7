// File: src/error.rs
// Purpose: Error types for route registration, navigation and route files

use std::path::PathBuf;

/// Configuration errors raised by registration and navigation calls.
///
/// None of these leave the router in a half-updated state: a failed
/// registration keeps the previous table, a failed navigation does not touch
/// the active map.
#[derive(Debug, thiserror::Error)]
pub enum RouterError {
    /// Navigation (or a `reroute`) named a route that is not registered
    #[error("route `{0}` is not registered")]
    UnknownRoute(String),

    /// Navigation (or a `reroute`) named a route without a push url
    #[error("route `{0}` has no push url")]
    MissingPushUrl(String),

    /// A route declared the reserved `404` name as its group
    #[error("route `{0}` uses the reserved group name `404`")]
    ReservedGroup(String),

    /// A match or exclude pattern failed to compile
    #[error("route `{name}` has an invalid pattern `{pattern}`")]
    InvalidPattern {
        name: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors raised while loading a TOML route file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read route file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse route file: {0}")]
    Parse(#[from] toml::de::Error),
}

//! docs-mirror: mirror a documentation site into a flat text store
//!
//! This crate crawls a documentation tree breadth-first from a base URL,
//! keeps the main content of every page as markdown, and pushes the
//! aggregated text into a remote destination (a Google Doc or files in a
//! Google Drive folder), replacing what was stored there before.

pub mod config;
pub mod content;
pub mod crawler;
pub mod sink;
pub mod sync;
pub mod text;

use thiserror::Error;

/// Main error type for docs-mirror operations
#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sink error: {0}")]
    Sink(#[from] SinkError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("No target named '{0}' in configuration")]
    UnknownTarget(String),

    #[error("{failed} of {total} target(s) failed")]
    TargetsFailed { failed: usize, total: usize },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Errors raised by a destination sink
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Missing or invalid credentials: {0}")]
    Credentials(String),

    #[error("HTTP error talking to {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Destination not found: {0}")]
    NotFound(String),

    #[error("Access denied to {0}")]
    Unauthorized(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected API response: {0}")]
    Decode(String),

    #[error("Operation not supported by this sink: {0}")]
    Unsupported(&'static str),
}

/// Result type alias for docs-mirror operations
pub type Result<T> = std::result::Result<T, MirrorError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for sink operations
pub type SinkResult<T> = std::result::Result<T, SinkError>;

// Re-export commonly used types
pub use config::{Config, Target};
pub use crawler::{crawl, AggregatedDocument, Crawler, HttpFetcher, PageFetcher};
pub use sink::Sink;
pub use text::{chunk, normalize};

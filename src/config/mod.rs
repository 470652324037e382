//! Configuration module for docs-mirror
//!
//! This module handles loading, parsing, and validating the list of
//! documentation targets. TOML is the native format; files ending in
//! `.json` are read as JSON.
//!
//! # Example
//!
//! ```no_run
//! use docs_mirror::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("docs.toml")).unwrap();
//! println!("{} targets configured", config.targets.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, FetchConfig, SinkConfig, SinkMode, Target, DEFAULT_MAX_WORDS, DEFAULT_TIMEOUT_SECS,
};

// Re-export parser functions
pub use parser::{
    compute_config_hash, load_config, load_config_with_hash, parse_config, ConfigFormat,
};

use crate::config::types::{Config, FetchConfig, SinkConfig, Target};
use crate::ConfigError;
use std::collections::HashSet;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_sink_config(&config.sink)?;
    validate_targets(&config.targets)?;
    Ok(())
}

/// Validates fetch configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    if config.timeout_secs < 1 || config.timeout_secs > 300 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be between 1 and 300, got {}",
            config.timeout_secs
        )));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates sink configuration
fn validate_sink_config(config: &SinkConfig) -> Result<(), ConfigError> {
    if config.max_words < 1 {
        return Err(ConfigError::Validation(format!(
            "max_words must be >= 1, got {}",
            config.max_words
        )));
    }

    Ok(())
}

/// Validates documentation targets
fn validate_targets(targets: &[Target]) -> Result<(), ConfigError> {
    let mut names = HashSet::new();

    for target in targets {
        if target.name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "target name cannot be empty".to_string(),
            ));
        }

        if !names.insert(target.name.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate target name '{}'",
                target.name
            )));
        }

        validate_source_url(&target.source_url)?;

        if target.destination_id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "target '{}' has an empty destination_id",
                target.name
            )));
        }
    }

    Ok(())
}

/// Validates a crawl base URL (HTTP or HTTPS only)
fn validate_source_url(source_url: &str) -> Result<(), ConfigError> {
    let url = Url::parse(source_url).map_err(|e| {
        ConfigError::InvalidUrl(format!("Invalid source URL '{}': {}", source_url, e))
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "Source URL '{}' must use HTTP or HTTPS",
            source_url
        )));
    }

    Ok(())
}

use crate::config::types::{Config, CrawlConfig, OutputConfig};
use crate::output::OutputFormat;
use crate::ConfigError;
use std::time::Duration;

/// Longest accepted per-request timeout
const MAX_TIMEOUT: Duration = Duration::from_secs(300);

/// Highest accepted redirect cap
const MAX_REDIRECTS_CAP: usize = 30;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawl_config(&config.http)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the HTTP parameters of a crawl
pub fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    if config.timeout < Duration::from_secs(1) || config.timeout > MAX_TIMEOUT {
        return Err(ConfigError::Validation(format!(
            "timeout must be between 1 and {} seconds, got {}",
            MAX_TIMEOUT.as_secs(),
            config.timeout.as_secs()
        )));
    }

    if config.max_redirects > MAX_REDIRECTS_CAP {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be at most {}, got {}",
            MAX_REDIRECTS_CAP, config.max_redirects
        )));
    }

    validate_user_agent(&config.user_agent)?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    config.format.parse::<OutputFormat>()?;
    Ok(())
}

/// The user agent ends up in a header value, so control characters are refused
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if user_agent.chars().any(|c| c.is_control()) {
        return Err(ConfigError::Validation(format!(
            "user_agent contains control characters: {:?}",
            user_agent
        )));
    }

    Ok(())
}

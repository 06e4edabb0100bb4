use crate::config::types::{ApiConfig, Config, OutputConfig, PacingConfig, SearchConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_search_config(&config.search)?;
    validate_pacing_config(&config.pacing)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates API access configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' must use http or https",
            config.base_url
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "base_url '{}' cannot be used as a base",
            config.base_url
        )));
    }

    if config.api_key.trim().is_empty() {
        return Err(ConfigError::Validation(
            "api_key cannot be empty (set it in the config or pass --api-key)".to_string(),
        ));
    }

    if config.timeout_secs == 0 || config.connect_timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeouts must be at least 1 second".to_string(),
        ));
    }

    Ok(())
}

/// Validates the search target and partitions
fn validate_search_config(config: &SearchConfig) -> Result<(), ConfigError> {
    if config.make.trim().is_empty() {
        return Err(ConfigError::Validation("make cannot be empty".to_string()));
    }

    if config.model.trim().is_empty() {
        return Err(ConfigError::Validation("model cannot be empty".to_string()));
    }

    if !(1980..=2100).contains(&config.year) {
        return Err(ConfigError::Validation(format!(
            "year must be between 1980 and 2100, got {}",
            config.year
        )));
    }

    if config.partitions.is_empty() {
        return Err(ConfigError::Validation(
            "at least one partition is required".to_string(),
        ));
    }

    for partition in &config.partitions {
        validate_partition(partition)?;
    }

    if config.page_limit < 1 || config.page_limit > 1000 {
        return Err(ConfigError::Validation(format!(
            "page_limit must be between 1 and 1000, got {}",
            config.page_limit
        )));
    }

    Ok(())
}

/// A partition is a short region code such as `NJ`
fn validate_partition(partition: &str) -> Result<(), ConfigError> {
    if partition.is_empty() {
        return Err(ConfigError::Validation(
            "partition cannot be empty".to_string(),
        ));
    }

    if !partition.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ConfigError::Validation(format!(
            "partition '{}' must be alphanumeric",
            partition
        )));
    }

    Ok(())
}

fn validate_pacing_config(config: &PacingConfig) -> Result<(), ConfigError> {
    if config.progress_interval < 1 {
        return Err(ConfigError::Validation(
            "progress_interval must be >= 1".to_string(),
        ));
    }

    Ok(())
}

fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("listings_path", &config.listings_path),
        ("history_path", &config.history_path),
        ("summary_path", &config.summary_path),
    ] {
        if value.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
    }

    if matches!(config.report_path.as_deref(), Some("")) {
        return Err(ConfigError::Validation(
            "report_path cannot be empty when set".to_string(),
        ));
    }

    Ok(())
}

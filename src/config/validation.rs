use crate::config::types::{Config, HttpConfig, ImportConfig, SectionConfig, SourceConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_http_config(&config.http)?;
    validate_source_config(&config.source)?;
    validate_section_config("news", &config.source.news)?;
    validate_section_config("events", &config.source.events)?;
    validate_import_config(&config.import)?;

    if config.output.database_path.is_empty() {
        return Err(ConfigError::Validation(
            "database_path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates HTTP client and retry configuration
fn validate_http_config(config: &HttpConfig) -> Result<(), ConfigError> {
    if config.user_agent.is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "timeout_secs must be >= 1".to_string(),
        ));
    }

    if config.retry.max_attempts < 1 {
        return Err(ConfigError::Validation(format!(
            "retry max_attempts must be >= 1, got {}",
            config.retry.max_attempts
        )));
    }

    if config.retry.backoff_factor < 0.0 {
        return Err(ConfigError::Validation(format!(
            "retry backoff_factor must be >= 0, got {}",
            config.retry.backoff_factor
        )));
    }

    Ok(())
}

/// Validates the source site configuration
fn validate_source_config(config: &SourceConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base_url: {}", e)))?;

    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(ConfigError::Validation(format!(
            "base_url must use http(s), got '{}'",
            config.base_url
        )));
    }

    if config.marker.is_empty() {
        return Err(ConfigError::Validation(
            "marker cannot be empty".to_string(),
        ));
    }

    if config.timezone().is_none() {
        return Err(ConfigError::Validation(format!(
            "timezone_offset_hours must be a valid UTC offset, got {}",
            config.timezone_offset_hours
        )));
    }

    for group in &config.trash_phrases {
        if group.is_empty() || group.iter().any(|token| token.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "trash_phrases groups must contain non-empty tokens".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates one listing-section configuration
fn validate_section_config(name: &str, config: &SectionConfig) -> Result<(), ConfigError> {
    if !config.listing_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "{} listing_path must start with '/', got '{}'",
            name, config.listing_path
        )));
    }

    if config.link_prefixes.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} must have at least one link prefix",
            name
        )));
    }

    for prefix in &config.link_prefixes {
        if !prefix.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "{} link prefix '{}' must start with '/'",
                name, prefix
            )));
        }
    }

    for selector in config
        .body_selectors
        .iter()
        .chain(config.date_selectors.iter())
    {
        Selector::parse(selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("{} selector '{}': {}", name, selector, e))
        })?;
    }

    if config.read_more_label.is_empty() {
        return Err(ConfigError::Validation(format!(
            "{} read_more_label cannot be empty",
            name
        )));
    }

    Ok(())
}

/// Validates import limits
fn validate_import_config(config: &ImportConfig) -> Result<(), ConfigError> {
    if config.max_fragments < 1 {
        return Err(ConfigError::Validation(format!(
            "max_fragments must be >= 1, got {}",
            config.max_fragments
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn test_invalid_base_url() {
        let mut config = Config::default();
        config.source.base_url = "not a url".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_non_http_base_url() {
        let mut config = Config::default();
        config.source.base_url = "ftp://www.rea.ru".to_string();
        assert!(matches!(
            validate(&config),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn test_zero_retry_attempts() {
        let mut config = Config::default();
        config.http.retry.max_attempts = 0;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_timezone_offset() {
        let mut config = Config::default();
        config.source.timezone_offset_hours = 99;
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_bad_selector() {
        let mut config = Config::default();
        config.source.news.body_selectors = vec!["div[".to_string()];
        assert!(matches!(
            validate(&config),
            Err(ConfigError::InvalidSelector(_))
        ));
    }

    #[test]
    fn test_link_prefix_must_be_absolute() {
        let mut config = Config::default();
        config.source.events.link_prefixes = vec!["event/".to_string()];
        assert!(validate(&config).is_err());
    }

    #[test]
    fn test_empty_trash_group_rejected() {
        let mut config = Config::default();
        config.source.trash_phrases = vec![vec![]];
        assert!(validate(&config).is_err());
    }
}

use crate::config::types::{CacheConfig, Config, CrawlConfig, SiteConfig, UserAgentConfig};
use crate::title::{normalize_title, ArticleSite};
use crate::ConfigError;

/// Upper bound for cache entry lifetime (ten years)
const MAX_TTL_SECONDS: u64 = 10 * 365 * 24 * 60 * 60;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_site_config(&config.site)?;
    validate_crawl_config(&config.crawl)?;
    validate_cache_config(&config.cache)?;
    validate_user_agent_config(&config.user_agent)?;
    Ok(())
}

/// Validates site configuration
fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if !config.article_path.starts_with('/') || !config.article_path.ends_with('/') {
        return Err(ConfigError::Validation(format!(
            "article-path must start and end with '/', got '{}'",
            config.article_path
        )));
    }

    if !config.render_path.starts_with('/') {
        return Err(ConfigError::Validation(format!(
            "render-path must start with '/', got '{}'",
            config.render_path
        )));
    }

    // Scheme, host and render endpoint checks live with the site model
    ArticleSite::from_config(config)?;

    Ok(())
}

/// Validates crawl configuration
fn validate_crawl_config(config: &CrawlConfig) -> Result<(), ConfigError> {
    normalize_title(&config.target).map_err(|e| {
        ConfigError::Validation(format!("target '{}' is not usable: {}", config.target, e))
    })?;

    if config.max_steps == Some(0) {
        return Err(ConfigError::Validation(
            "max-steps must be >= 1 when set".to_string(),
        ));
    }

    Ok(())
}

/// Validates cache configuration
fn validate_cache_config(config: &CacheConfig) -> Result<(), ConfigError> {
    if config.ttl_seconds == 0 || config.ttl_seconds > MAX_TTL_SECONDS {
        return Err(ConfigError::Validation(format!(
            "ttl-seconds must be between 1 and {}, got {}",
            MAX_TTL_SECONDS, config.ttl_seconds
        )));
    }

    if let Some(path) = &config.path {
        if path.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "cache path cannot be empty".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates user agent configuration
fn validate_user_agent_config(config: &UserAgentConfig) -> Result<(), ConfigError> {
    // Validate crawler name: non-empty, alphanumeric + hyphens only
    if config.crawler_name.is_empty() {
        return Err(ConfigError::Validation(
            "crawler-name cannot be empty".to_string(),
        ));
    }

    if !config
        .crawler_name
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-')
    {
        return Err(ConfigError::Validation(format!(
            "crawler-name must contain only alphanumeric characters and hyphens, got '{}'",
            config.crawler_name
        )));
    }

    if config.crawler_version.trim().is_empty() {
        return Err(ConfigError::Validation(
            "crawler-version cannot be empty".to_string(),
        ));
    }

    if config.timeout_seconds == 0 {
        return Err(ConfigError::Validation(
            "timeout-seconds must be >= 1".to_string(),
        ));
    }

    Ok(())
}

use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use philo_walk::config::load_config;
///
/// let config = load_config(Path::new("philowalk.toml")).unwrap();
/// println!("Target: {}", config.crawl.target);
/// ```
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    parse_config(&content)
}

/// Parses and validates configuration from TOML text
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;

    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[site]
base-url = "https://de.wikipedia.org"
article-path = "/wiki/"
render-path = "/w/index.php"

[crawl]
target = "Philosophie"
max-steps = 50

[cache]
path = "/tmp/philowalk_cache"
ttl-seconds = 3600

[user-agent]
crawler-name = "TestWalker"
crawler-version = "2.0"
timeout-seconds = 5
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.site.base_url, "https://de.wikipedia.org");
        assert_eq!(config.crawl.target, "Philosophie");
        assert_eq!(config.crawl.max_steps, Some(50));
        assert_eq!(config.cache.path, Some(PathBuf::from("/tmp/philowalk_cache")));
        assert_eq!(config.cache.ttl_seconds, 3600);
        assert_eq!(config.user_agent.header_value(), "TestWalker/2.0");
        assert_eq!(config.user_agent.timeout_seconds, 5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();

        assert_eq!(config.site.base_url, "https://en.wikipedia.org");
        assert_eq!(config.site.article_path, "/wiki/");
        assert_eq!(config.crawl.target, "Philosophy");
        assert_eq!(config.crawl.max_steps, None);
        assert_eq!(config.cache.path, None);
        assert_eq!(config.cache.ttl_seconds, 86_400);
        assert_eq!(config.user_agent.header_value(), "PhiloWalk/1.0");
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = parse_config("[crawl]\ntarget = \"Mathematics\"\n").unwrap();

        assert_eq!(config.crawl.target, "Mathematics");
        assert_eq!(config.crawl.max_steps, None);
        assert_eq!(config.site.render_path, "/w/index.php");
    }

    #[test]
    fn test_default_cache_path_is_dotfile() {
        let config = parse_config("").unwrap();
        let path = config.cache.resolved_path();
        assert!(path.ends_with(".philowalk_cache"));
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/philowalk.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let file = create_temp_config("this is not valid TOML {{{");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let file = create_temp_config("[cache]\nttl-seconds = 0\n");
        let result = load_config(file.path());
        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }
}

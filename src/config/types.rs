use serde::Deserialize;
use std::path::PathBuf;

/// File name of the per-user cache dotfile
pub const DEFAULT_CACHE_FILE: &str = ".philowalk_cache";

/// Main configuration structure for Philo-Walk
///
/// Every section is optional in the TOML file; missing values fall back to
/// the English-language encyclopedia defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
}

/// Where articles are fetched from and how links to them look
#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    /// Scheme and host of the encyclopedia
    #[serde(rename = "base-url", default = "default_base_url")]
    pub base_url: String,

    /// Path prefix of article pages
    #[serde(rename = "article-path", default = "default_article_path")]
    pub article_path: String,

    /// Path of the endpoint that returns a rendered article body
    #[serde(rename = "render-path", default = "default_render_path")]
    pub render_path: String,
}

/// Crawl behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Article the walk is trying to reach
    #[serde(default = "default_target")]
    pub target: String,

    /// Give up after this many steps (unbounded when absent)
    #[serde(rename = "max-steps", default)]
    pub max_steps: Option<u32>,
}

/// Title cache configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CacheConfig {
    /// Cache file location (per-user dotfile when absent)
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Lifetime of a cached entry in seconds
    #[serde(rename = "ttl-seconds", default = "default_ttl_seconds")]
    pub ttl_seconds: u64,
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name", default = "default_crawler_name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version", default = "default_crawler_version")]
    pub crawler_version: String,

    /// Whole-request timeout for page fetches
    #[serde(rename = "timeout-seconds", default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl CacheConfig {
    /// Resolves the cache file path, falling back to `~/.philowalk_cache`
    ///
    /// Uses the working directory when no home directory can be determined.
    pub fn resolved_path(&self) -> PathBuf {
        match &self.path {
            Some(path) => path.clone(),
            None => directories::BaseDirs::new()
                .map(|dirs| dirs.home_dir().join(DEFAULT_CACHE_FILE))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE)),
        }
    }
}

impl UserAgentConfig {
    /// Formats the User-Agent header value: `Name/Version`
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            article_path: default_article_path(),
            render_path: default_render_path(),
        }
    }
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
            max_steps: None,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            path: None,
            ttl_seconds: default_ttl_seconds(),
        }
    }
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: default_crawler_name(),
            crawler_version: default_crawler_version(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}

fn default_base_url() -> String {
    "https://en.wikipedia.org".to_string()
}

fn default_article_path() -> String {
    "/wiki/".to_string()
}

fn default_render_path() -> String {
    "/w/index.php".to_string()
}

fn default_target() -> String {
    "Philosophy".to_string()
}

fn default_ttl_seconds() -> u64 {
    24 * 60 * 60
}

fn default_crawler_name() -> String {
    "PhiloWalk".to_string()
}

fn default_crawler_version() -> String {
    "1.0".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

//! Philo-Walk: a "Getting to Philosophy" explorer
//!
//! Starting from any encyclopedia article, this crate repeatedly follows the
//! first qualifying link in the rendered article body until it reaches a
//! target article, hits a dead end, or detects a cycle. Per-title results are
//! memoized in a persisted cache with time-based expiration.

pub mod cache;
pub mod config;
pub mod crawler;
pub mod extract;
pub mod state;
pub mod title;

use thiserror::Error;

/// Main error type for Philo-Walk operations
#[derive(Debug, Error)]
pub enum PhiloError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Article title errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TitleError {
    #[error("title is empty")]
    Empty,

    #[error("'{0}' is not an article (namespaced title)")]
    Namespaced(String),
}

/// Result type alias for Philo-Walk operations
pub type Result<T> = std::result::Result<T, PhiloError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for title operations
pub type TitleResult<T> = std::result::Result<T, TitleError>;

// Re-export commonly used types
pub use cache::TitleCache;
pub use config::Config;
pub use crawler::{Crawler, HttpPageSource, PageSource};
pub use extract::{parse_markup, LinkExtractor};
pub use state::{CrawlOutcome, DeadEndCause, Step};
pub use title::{cache_key, normalize_title, ArticleSite};

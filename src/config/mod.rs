//! Configuration module for Philo-Walk
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every key has a default, so an empty file (or no file
//! at all) walks the English-language encyclopedia towards "Philosophy".
//!
//! # Example
//!
//! ```no_run
//! use philo_walk::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("philowalk.toml")).unwrap();
//! println!("Walking towards: {}", config.crawl.target);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    CacheConfig, Config, CrawlConfig, SiteConfig, UserAgentConfig, DEFAULT_CACHE_FILE,
};

// Re-export parser functions
pub use parser::{load_config, parse_config};
pub use validation::validate;

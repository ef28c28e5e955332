//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with proper user agent strings
//! - GET requests for rendered article bodies
//! - Error classification
//!
//! No retries are made: a failed fetch is reported once and the crawler
//! treats the title as a dead end.

use crate::config::{Config, UserAgentConfig};
use crate::title::ArticleSite;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// The article does not exist (HTTP 404)
    NotFound,

    /// Any other non-success HTTP status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use philo_walk::config::UserAgentConfig;
/// use philo_walk::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.header_value())
        .timeout(Duration::from_secs(config.timeout_seconds))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
///
/// | Condition | Result |
/// |-----------|--------|
/// | HTTP 2xx | Success |
/// | HTTP 404 | NotFound |
/// | Other HTTP status | HttpError |
/// | Timeout / connection / body error | NetworkError |
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            let final_url = response.url().to_string();

            if status == StatusCode::NOT_FOUND {
                return FetchResult::NotFound;
            }

            if !status.is_success() {
                return FetchResult::HttpError {
                    status_code: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => FetchResult::Success {
                    final_url,
                    status_code: status.as_u16(),
                    body,
                },
                Err(e) => FetchResult::NetworkError {
                    error: e.to_string(),
                },
            }
        }
        Err(e) => {
            // Classify error
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            FetchResult::NetworkError { error }
        }
    }
}

/// Source of rendered article bodies
///
/// Returns None on any failure; callers cannot tell a transient failure from
/// a missing article.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetches the rendered body of `title`
    async fn fetch(&self, title: &str) -> Option<String>;
}

#[async_trait]
impl<T: PageSource + ?Sized> PageSource for &T {
    async fn fetch(&self, title: &str) -> Option<String> {
        (**self).fetch(title).await
    }
}

/// Fetches rendered article bodies from the site's render endpoint
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: Client,
    site: ArticleSite,
}

impl HttpPageSource {
    /// Creates a page source from an existing client
    pub fn new(client: Client, site: ArticleSite) -> Self {
        Self { client, site }
    }

    /// Creates a page source from the site and user-agent configuration
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        let site = ArticleSite::from_config(&config.site)?;
        let client = build_http_client(&config.user_agent)?;
        Ok(Self::new(client, site))
    }
}

#[async_trait]
impl PageSource for HttpPageSource {
    async fn fetch(&self, title: &str) -> Option<String> {
        let url = self.site.render_url(title);
        tracing::debug!("Fetching {}", url);

        match fetch_url(&self.client, url.as_str()).await {
            FetchResult::Success {
                final_url,
                status_code,
                body,
            } => {
                tracing::debug!(
                    "Fetched {} ({} bytes, HTTP {})",
                    final_url,
                    body.len(),
                    status_code
                );
                Some(body)
            }
            FetchResult::NotFound => {
                tracing::warn!("Article {} does not exist", title);
                None
            }
            FetchResult::HttpError { status_code } => {
                tracing::warn!("Fetching {} failed with HTTP {}", title, status_code);
                None
            }
            FetchResult::NetworkError { error } => {
                tracing::warn!("Fetching {} failed: {}", title, error);
                None
            }
        }
    }
}

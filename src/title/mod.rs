//! Article title handling
//!
//! This module maps between article titles and the site they live on:
//! - Title normalization (spaces vs underscores, namespace rejection)
//! - Resolving link references to same-site article titles
//! - Building render URLs for fetching
//! - Cache key construction

mod normalize;

use crate::config::SiteConfig;
use crate::{ConfigError, ConfigResult};
use url::Url;

pub use normalize::{display_title, normalize_title, title_from_path_segment};

/// Builds the cache key for a title on a given host
///
/// Keys are namespaced by host so one cache file can serve several sites.
///
/// # Examples
///
/// ```
/// use philo_walk::title::cache_key;
///
/// assert_eq!(cache_key("en.wikipedia.org", "Logic"), "en.wikipedia.org:Logic");
/// ```
pub fn cache_key(host: &str, title: &str) -> String {
    format!("{}:{}", host, title)
}

/// An encyclopedia site: where articles live and how to render them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleSite {
    base: Url,
    article_path: String,
    render_endpoint: Url,
}

impl ArticleSite {
    /// Creates a site from its base URL and path layout
    ///
    /// # Arguments
    ///
    /// * `base_url` - Scheme and host of the site (e.g. `https://en.wikipedia.org`)
    /// * `article_path` - Path prefix of article pages (e.g. `/wiki/`)
    /// * `render_path` - Path of the endpoint returning rendered article bodies
    pub fn new(base_url: &str, article_path: &str, render_path: &str) -> ConfigResult<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", base_url, e)))?;

        if base.scheme() != "http" && base.scheme() != "https" {
            return Err(ConfigError::InvalidUrl(format!(
                "base-url must use http or https, got: {}",
                base.scheme()
            )));
        }

        if base.host_str().is_none() {
            return Err(ConfigError::InvalidUrl(format!(
                "base-url '{}' has no host",
                base_url
            )));
        }

        let render_endpoint = base.join(render_path).map_err(|e| {
            ConfigError::InvalidUrl(format!("Invalid render-path '{}': {}", render_path, e))
        })?;

        Ok(Self {
            base,
            article_path: article_path.to_string(),
            render_endpoint,
        })
    }

    /// Creates a site from the `[site]` configuration section
    pub fn from_config(config: &SiteConfig) -> ConfigResult<Self> {
        Self::new(&config.base_url, &config.article_path, &config.render_path)
    }

    /// Host (plus explicit port, if any) used to namespace cache keys
    pub fn host(&self) -> String {
        let host = self.base.host_str().unwrap_or_default();
        match self.base.port() {
            Some(port) => format!("{}:{}", host, port),
            None => host.to_string(),
        }
    }

    /// Resolves a raw link reference to a normalized article title
    ///
    /// Returns None (inadmissible, not an error) when the reference:
    /// - is empty or a same-page fragment
    /// - is document-relative (`Logic`, `../wiki/Logic`) or malformed
    /// - points at another host or port
    /// - is not under the article path prefix
    /// - names a namespaced page (Category:, File:, ...)
    ///
    /// Query strings and fragments are dropped.
    pub fn title_from_href(&self, href: &str) -> Option<String> {
        let href = href.trim();
        if href.is_empty() || href.starts_with('#') {
            return None;
        }
        // Document-relative references depend on the page they appear on
        if !href.starts_with('/') && Url::parse(href).is_err() {
            return None;
        }

        let url = self.base.join(href).ok()?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return None;
        }
        if url.host_str() != self.base.host_str() || url.port() != self.base.port() {
            return None;
        }

        let segment = url.path().strip_prefix(self.article_path.as_str())?;
        title_from_path_segment(segment)
    }

    /// URL returning the rendered body of `title`
    pub fn render_url(&self, title: &str) -> Url {
        let mut url = self.render_endpoint.clone();
        url.query_pairs_mut()
            .append_pair("action", "render")
            .append_pair("title", title);
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn site() -> ArticleSite {
        ArticleSite::from_config(&SiteConfig::default()).unwrap()
    }

    #[test]
    fn test_relative_article_link() {
        assert_eq!(site().title_from_href("/wiki/Logic"), Some("Logic".to_string()));
    }

    #[test]
    fn test_protocol_relative_link() {
        assert_eq!(
            site().title_from_href("//en.wikipedia.org/wiki/Ancient_Greek"),
            Some("Ancient_Greek".to_string())
        );
    }

    #[test]
    fn test_absolute_http_link() {
        assert_eq!(
            site().title_from_href("http://en.wikipedia.org/wiki/Philosophy"),
            Some("Philosophy".to_string())
        );
    }

    #[test]
    fn test_fragment_and_query_stripped() {
        assert_eq!(
            site().title_from_href("/wiki/Logic#History"),
            Some("Logic".to_string())
        );
        assert_eq!(
            site().title_from_href("/wiki/Logic?oldid=12"),
            Some("Logic".to_string())
        );
    }

    #[test]
    fn test_other_host_rejected() {
        assert_eq!(site().title_from_href("https://de.wikipedia.org/wiki/Logik"), None);
        assert_eq!(site().title_from_href("https://example.com/wiki/Logic"), None);
    }

    #[test]
    fn test_non_article_path_rejected() {
        assert_eq!(
            site().title_from_href("/w/index.php?title=Logic&action=edit"),
            None
        );
        assert_eq!(site().title_from_href("Logic"), None);
        assert_eq!(site().title_from_href("wiki/Logic"), None);
        assert_eq!(site().title_from_href("../wiki/Logic"), None);
        assert_eq!(site().title_from_href("/wiki/"), None);
    }

    #[test]
    fn test_fragment_only_rejected() {
        assert_eq!(site().title_from_href("#cite_note-1"), None);
        assert_eq!(site().title_from_href(""), None);
    }

    #[test]
    fn test_namespaced_link_rejected() {
        assert_eq!(site().title_from_href("/wiki/Category:Logic"), None);
        assert_eq!(site().title_from_href("/wiki/Help:IPA/English"), None);
    }

    #[test]
    fn test_non_http_scheme_rejected() {
        assert_eq!(site().title_from_href("mailto:someone@example.com"), None);
        assert_eq!(site().title_from_href("javascript:void(0)"), None);
    }

    #[test]
    fn test_host_with_port() {
        let site = ArticleSite::new("http://127.0.0.1:8080", "/wiki/", "/w/index.php").unwrap();
        assert_eq!(site.host(), "127.0.0.1:8080");
        assert_eq!(site.title_from_href("/wiki/Logic"), Some("Logic".to_string()));
        assert_eq!(site.title_from_href("http://127.0.0.1:9090/wiki/Logic"), None);
    }

    #[test]
    fn test_default_host() {
        assert_eq!(site().host(), "en.wikipedia.org");
    }

    #[test]
    fn test_render_url() {
        let url = site().render_url("Ancient_Greek");
        assert_eq!(
            url.as_str(),
            "https://en.wikipedia.org/w/index.php?action=render&title=Ancient_Greek"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(ArticleSite::new("not a url", "/wiki/", "/w/index.php").is_err());
        assert!(ArticleSite::new("ftp://example.com", "/wiki/", "/w/index.php").is_err());
    }

    #[test]
    fn test_cache_key() {
        assert_eq!(cache_key("en.wikipedia.org", "Logic"), "en.wikipedia.org:Logic");
    }
}

//! First-link search over a parsed article body
//!
//! The search is a depth-first, pre-order walk that returns the first link a
//! reader scanning the rendered page top to bottom would click:
//!
//! **Skipped subtrees:**
//! - `<table>` (infoboxes, navboxes) and `<i>` (pronunciations, foreign terms)
//! - Elements carrying a hatnote, floated-image or see-also class
//! - The geographic coordinates widget
//!
//! **Skipped links:**
//! - Links that do not resolve to a same-site, non-namespaced article
//! - Links inside an unclosed parenthesis
//!
//! A link element is always a leaf of the search: its children are never
//! inspected for a nested link.

use crate::extract::pretext::PreTextMemo;
use crate::extract::parse_markup;
use crate::title::ArticleSite;
use scraper::node::Element;
use scraper::{ElementRef, Html};

/// Tags whose whole subtree is non-narrative
const EXCLUDED_TAGS: &[&str] = &["table", "i"];

/// Classes marking disambiguation notes, floated images and cross-reference boxes
const EXCLUDED_CLASSES: &[&str] = &["dablink", "hatnote", "rellink", "seealso", "tright", "thumb"];

/// Element ids of widgets that are never part of the article text
const EXCLUDED_IDS: &[&str] = &["coordinates"];

/// Finds the first admissible link in a rendered article body
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    site: ArticleSite,
}

impl LinkExtractor {
    /// Creates an extractor that resolves links against `site`
    pub fn new(site: ArticleSite) -> Self {
        Self { site }
    }

    /// Returns the normalized title of the first admissible link, if any
    ///
    /// The root element is the synthetic wrapper added by the parser and is
    /// never treated as a link itself.
    ///
    /// # Example
    ///
    /// ```
    /// use philo_walk::config::SiteConfig;
    /// use philo_walk::extract::{parse_markup, LinkExtractor};
    /// use philo_walk::title::ArticleSite;
    ///
    /// let site = ArticleSite::from_config(&SiteConfig::default()).unwrap();
    /// let document = parse_markup(
    ///     r#"<p>Logic (<a href="/wiki/Greek">Greek</a>) is <a href="/wiki/Reasoning">reasoning</a></p>"#,
    /// );
    /// let first = LinkExtractor::new(site).find_first_link(&document);
    /// assert_eq!(first.as_deref(), Some("Reasoning"));
    /// ```
    pub fn find_first_link(&self, document: &Html) -> Option<String> {
        // Node ids are tree-local: one fresh memo per document
        let mut memo = PreTextMemo::new();

        document
            .root_element()
            .children()
            .filter_map(ElementRef::wrap)
            .find_map(|child| self.search(child, &mut memo))
    }

    /// Parses `markup` and returns its first admissible link
    pub fn find_first_link_in(&self, markup: &str) -> Option<String> {
        let document = parse_markup(markup);
        self.find_first_link(&document)
    }

    fn search(&self, element: ElementRef<'_>, memo: &mut PreTextMemo) -> Option<String> {
        let value = element.value();

        if is_excluded(value) {
            return None;
        }

        if value.name() == "a" {
            let title = value.attr("href").and_then(|href| self.site.title_from_href(href))?;
            if memo.is_inside_open_parenthesis(*element) {
                tracing::trace!("Skipping parenthetical link to {}", title);
                return None;
            }
            return Some(title);
        }

        element
            .children()
            .filter_map(ElementRef::wrap)
            .find_map(|child| self.search(child, memo))
    }
}

/// Returns true if the element's whole subtree is outside the article narrative
pub fn is_excluded(element: &Element) -> bool {
    if EXCLUDED_TAGS.contains(&element.name()) {
        return true;
    }

    if element
        .classes()
        .any(|class| EXCLUDED_CLASSES.contains(&class))
    {
        return true;
    }

    matches!(element.id(), Some(id) if EXCLUDED_IDS.contains(&id))
}

//! Link extraction for rendered article bodies
//!
//! This module contains:
//! - Markup parsing into a navigable element tree
//! - The first-link search with its structural exclusions
//! - Reading-order text reconstruction for the parenthesis test

mod links;
mod pretext;

pub use links::{is_excluded, LinkExtractor};
pub use pretext::{has_unclosed_parenthesis, PreTextMemo};

use scraper::Html;

/// Parses a rendered article body into an element tree
///
/// The body is parsed as an HTML fragment, so it ends up inside a synthetic
/// `<html>` container element regardless of how many top-level elements it
/// has. Parsing never fails: malformed markup is repaired the way a browser
/// would repair it.
///
/// # Example
///
/// ```
/// use philo_walk::extract::parse_markup;
///
/// let document = parse_markup("<p>one</p><p>two</p>");
/// assert_eq!(document.root_element().value().name(), "html");
/// ```
pub fn parse_markup(markup: &str) -> Html {
    Html::parse_fragment(markup)
}

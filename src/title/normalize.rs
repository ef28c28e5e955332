use crate::{TitleError, TitleResult};
use percent_encoding::percent_decode_str;

/// Separator that marks non-article namespaces (Category:, File:, Help:, ...)
const NAMESPACE_SEPARATOR: char = ':';

/// Normalizes a user-supplied or link-derived article title
///
/// # Normalization Steps
///
/// 1. Trim surrounding whitespace
/// 2. Map spaces to underscores (the canonical stored form)
/// 3. Reject empty titles
/// 4. Reject namespaced titles (anything containing `:`)
///
/// # Examples
///
/// ```
/// use philo_walk::title::normalize_title;
///
/// assert_eq!(normalize_title(" Ancient Greek ").unwrap(), "Ancient_Greek");
/// assert!(normalize_title("Category:Logic").is_err());
/// ```
pub fn normalize_title(raw: &str) -> TitleResult<String> {
    let title = raw.trim().replace(' ', "_");

    if title.trim_matches('_').is_empty() {
        return Err(TitleError::Empty);
    }

    if title.contains(NAMESPACE_SEPARATOR) {
        return Err(TitleError::Namespaced(title));
    }

    Ok(title)
}

/// Turns the article segment of a link path into a normalized title
///
/// The segment is percent-decoded before the namespace check, so an encoded
/// `%3A` is rejected just like a literal colon. Returns None for anything
/// that is not an article.
pub fn title_from_path_segment(segment: &str) -> Option<String> {
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    normalize_title(&decoded).ok()
}

/// Formats a normalized title for people to read
pub fn display_title(title: &str) -> String {
    title.replace('_', " ")
}

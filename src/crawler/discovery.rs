//! Theme directory discovery
//!
//! Candidate theme directories are gathered from the index page by two
//! strategies:
//! - URLs present on `<link href>` or `<script src>` elements
//! - A markup-ignoring scan of the whole document, comments included, used
//!   only when the first strategy finds nothing. Theme paths are sometimes
//!   left as debugging info by developers or disclosed on purpose by theme
//!   authors.

use crate::url::{backfill_scheme, is_same_origin};
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

/// Path segment every WordPress theme asset lives under
pub const THEME_PATH_MARKER: &str = "/wp-content/themes/";

/// Everything up to the theme directory, e.g. `https://h/wp-content/themes/name/`
static THEME_DIR_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*?/wp-content/themes/[\w\-+.]+/").expect("theme directory pattern is valid")
});

/// Absolute or protocol-relative theme directory URLs anywhere in a text
static GLOBAL_THEME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)(?://|https?:)[^\s"'<>()]*?/wp-content/themes/[\w\-]+/"#)
        .expect("global theme pattern is valid")
});

/// Element/attribute pairs that may point at theme assets
const ASSET_SELECTORS: &[(&str, &str)] = &[
    (r#"link[href*="/wp-content/themes/"]"#, "href"),
    (r#"script[src*="/wp-content/themes/"]"#, "src"),
];

/// Cuts a theme asset URL down to its theme directory
///
/// # Examples
///
/// ```
/// use wpoke::crawler::truncate_theme_url;
///
/// assert_eq!(
///     truncate_theme_url("http://h/wp-content/themes/twelve/plugins/jquery.min.js").as_deref(),
///     Some("http://h/wp-content/themes/twelve/")
/// );
/// ```
pub fn truncate_theme_url(url: &str) -> Option<String> {
    THEME_DIR_RE.find(url.trim()).map(|m| m.as_str().to_string())
}

/// Truncates every URL to its theme directory and removes duplicates
///
/// Order of first appearance is kept.
pub fn remove_duplicated_theme_urls<I, S>(urls: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    urls.into_iter()
        .filter_map(|url| truncate_theme_url(url.as_ref()))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}

/// Collects theme asset URLs from `<link>` and `<script>` elements
fn extract_theme_path_by_elements(document: &Html) -> Vec<String> {
    let mut matches = Vec::new();

    for (selector, attribute) in ASSET_SELECTORS {
        if let Ok(selector) = Selector::parse(selector) {
            for element in document.select(&selector) {
                if let Some(value) = element.value().attr(attribute) {
                    matches.push(value.to_string());
                }
            }
        }
    }

    matches
}

/// Searches the raw text for theme directories hosted on the target itself
pub fn extract_theme_path_by_global_regex(canonical_url: &Url, html: &str) -> Vec<String> {
    let matches = GLOBAL_THEME_RE
        .find_iter(html)
        .map(|m| m.as_str())
        .filter(|candidate| is_same_origin(candidate, canonical_url.as_str()));

    remove_duplicated_theme_urls(matches)
}

/// Extracts candidate theme directory URLs from an HTML document
///
/// Returns `None` when the document is empty after trimming, so callers can
/// tell an unusable body apart from a page without candidates. Every
/// returned URL is absolute and ends with `/`.
///
/// # Example
///
/// ```
/// use url::Url;
/// use wpoke::crawler::extract_theme_path_candidates;
///
/// let html = r#"<html><head><link rel="stylesheet" href="/wp-content/themes/baskerville/style.css"></head></html>"#;
/// let canonical = Url::parse("https://normal.wp.com/").unwrap();
/// let candidates = extract_theme_path_candidates(&canonical, html).unwrap();
/// assert_eq!(candidates, vec!["https://normal.wp.com/wp-content/themes/baskerville/"]);
/// ```
pub fn extract_theme_path_candidates(canonical_url: &Url, html: &str) -> Option<Vec<String>> {
    let html = html.trim();
    if html.is_empty() {
        return None;
    }

    let document = Html::parse_document(html);
    let mut candidates = remove_duplicated_theme_urls(extract_theme_path_by_elements(&document));
    tracing::debug!("Found {} theme paths in document elements", candidates.len());

    if candidates.is_empty() {
        candidates = extract_theme_path_by_global_regex(canonical_url, html);
        tracing::debug!("Found {} theme paths by global text search", candidates.len());
    }

    // URIs may omit the scheme (//domain.com/wp-content/...) or be relative
    let mut seen = HashSet::new();
    let result = candidates
        .iter()
        .filter_map(|candidate| backfill_scheme(candidate, canonical_url))
        .map(String::from)
        .filter(|url| seen.insert(url.clone()))
        .collect();

    Some(result)
}

//! Theme header extraction from `style.css`

use crate::theme::{ThemeHeader, ThemeMetadata};
use crate::{Result, WpokeError};
use once_cell::sync::Lazy;
use regex::Regex;

/// One case-insensitive, multi-line pattern per header, in extraction order
///
/// Same shape as WordPress' own `get_file_data`: optional leading blanks or
/// comment markers, the label, a colon, then the value up to end of line.
static HEADER_PATTERNS: Lazy<Vec<(ThemeHeader, Regex)>> = Lazy::new(|| {
    ThemeHeader::ALL
        .iter()
        .map(|header| {
            let pattern = format!(
                r"(?im)^[ \t/*#@]*{}:(?P<value>.*)$",
                regex::escape(header.label())
            );
            let regex = Regex::new(&pattern).expect("header pattern is valid");
            (*header, regex)
        })
        .collect()
});

/// Strips a trailing comment terminator and surrounding blanks
fn cleanup_header_value(raw: &str) -> &str {
    let value = match raw.find("*/") {
        Some(end) => &raw[..end],
        None => raw,
    };
    value.trim()
}

/// Extracts theme metadata from the raw content of a `style.css`
///
/// The first occurrence of a header wins. A header present with an empty
/// value is recorded as an empty string.
///
/// # Errors
///
/// Returns [`WpokeError::BundledTheme`] when not a single header matched,
/// which usually means the stylesheet went through an asset bundler.
///
/// # Example
///
/// ```
/// use wpoke::crawler::extract_info_from_css;
///
/// let css = "/*\nTheme Name: Baskerville\nVersion: 1.19\n*/";
/// let theme = extract_info_from_css(css).unwrap();
/// assert_eq!(theme.theme_name.as_deref(), Some("Baskerville"));
/// assert_eq!(theme.version.as_deref(), Some("1.19"));
/// ```
pub fn extract_info_from_css(css_content: &str) -> Result<ThemeMetadata> {
    let css_content = css_content.replace("\r\n", "\n").replace('\r', "\n");
    let mut metadata = ThemeMetadata::default();
    let mut any_match = false;

    for (header, regex) in HEADER_PATTERNS.iter() {
        if let Some(captures) = regex.captures(&css_content) {
            let value = captures.name("value").map_or("", |m| m.as_str());
            metadata.set(*header, cleanup_header_value(value));
            any_match = true;
        }
    }

    if !any_match {
        return Err(WpokeError::BundledTheme);
    }

    Ok(metadata)
}

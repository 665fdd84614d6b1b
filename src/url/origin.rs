use crate::{ValidationError, ValidationResult};
use url::Url;

/// Extracts the lowercase host of a URL
///
/// # Examples
///
/// ```
/// use url::Url;
/// use wpoke::url::extract_host;
///
/// let url = Url::parse("https://EXAMPLE.COM:8080/path").unwrap();
/// assert_eq!(extract_host(&url), Some("example.com".to_string()));
/// ```
pub fn extract_host(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}

/// Parses an absolute or protocol-relative URL (`//host/path`)
fn parse_lenient(value: &str) -> Option<Url> {
    let value = value.trim();
    if value.starts_with("//") {
        Url::parse(&format!("http:{}", value)).ok()
    } else {
        Url::parse(value).ok()
    }
}

/// Returns true if both URLs point at the same host
///
/// Only the host component takes part in the comparison: scheme, port and
/// path are ignored. Unparseable input never matches.
///
/// # Examples
///
/// ```
/// use wpoke::url::is_same_origin;
///
/// assert!(is_same_origin("https://wp.com/a", "http://wp.com/b"));
/// assert!(is_same_origin("//wp.com/wp-content/themes/x/", "https://wp.com/"));
/// assert!(!is_same_origin("https://cdn.wp.com/a", "https://wp.com/"));
/// ```
pub fn is_same_origin(a: &str, b: &str) -> bool {
    match (
        parse_lenient(a).as_ref().and_then(extract_host),
        parse_lenient(b).as_ref().and_then(extract_host),
    ) {
        (Some(host_a), Some(host_b)) => host_a == host_b,
        _ => false,
    }
}

/// Same as [`is_same_origin`], reporting a mismatch as an error
pub fn ensure_same_origin(a: &str, b: &str) -> ValidationResult<()> {
    if a.trim().is_empty() || b.trim().is_empty() {
        return Err(ValidationError::Empty);
    }
    if is_same_origin(a, b) {
        Ok(())
    } else {
        Err(ValidationError::SameOriginViolated(
            a.to_string(),
            b.to_string(),
        ))
    }
}

/// Turns a discovered reference into an absolute URL
///
/// Protocol-relative references get the canonical URL's scheme; relative
/// references are resolved against the canonical URL. Absolute references
/// are kept as they are.
pub fn backfill_scheme(candidate: &str, canonical: &Url) -> Option<Url> {
    let candidate = candidate.trim();
    if candidate.starts_with("//") {
        return Url::parse(&format!("{}:{}", canonical.scheme(), candidate)).ok();
    }
    canonical.join(candidate).ok()
}

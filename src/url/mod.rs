//! URL helpers for origin handling and link resolution
//!
//! The crawler never leaves the seed's scheme+host. Every reference found in
//! markup is resolved against the seed origin before it is compared, stored,
//! or fetched.

use url::Url;

/// Returns the origin prefix of a URL: `scheme://host[:port]`, no trailing slash
///
/// # Example
///
/// ```
/// use sitebrief::url::origin_prefix;
/// use url::Url;
///
/// let seed = Url::parse("https://x.test/start").unwrap();
/// assert_eq!(origin_prefix(&seed), "https://x.test");
/// ```
pub fn origin_prefix(url: &Url) -> String {
    let mut prefix = format!("{}://{}", url.scheme(), url.host_str().unwrap_or(""));
    if let Some(port) = url.port() {
        prefix.push(':');
        prefix.push_str(&port.to_string());
    }
    prefix
}

/// Resolves a raw href to an absolute URL string
///
/// Rules:
/// - hrefs are trimmed; empty hrefs are dropped
/// - `javascript:`, `mailto:`, `tel:` and `data:` hrefs are dropped
/// - fragment-only hrefs (same-page anchors) are dropped
/// - hrefs starting with `/` are rewritten as `origin_prefix + href`
/// - everything else is passed through as-is
pub fn resolve_href(href: &str, origin_prefix: &str) -> Option<String> {
    let href = href.trim();

    if href.is_empty() {
        return None;
    }

    if href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
        || href.starts_with("data:")
    {
        return None;
    }

    if href.starts_with('#') {
        return None;
    }

    if href.starts_with('/') {
        Some(format!("{}{}", origin_prefix, href))
    } else {
        Some(href.to_string())
    }
}

/// Counts the slashes in a URL string
///
/// Used by the page-link heuristic: a link is only followed when its slash
/// count does not exceed the parent's by more than 2. This is a proxy for
/// path depth and can misclassify URLs with slashes in query strings; the
/// behavior is intentional.
pub fn slash_count(url: &str) -> usize {
    url.bytes().filter(|b| *b == b'/').count()
}

/// Tests whether a URL ends with one of the recognized file extensions
///
/// The comparison is case-insensitive.
pub fn matches_extension(url: &str, extensions: &[String]) -> bool {
    let lower = url.to_lowercase();
    extensions
        .iter()
        .any(|ext| lower.ends_with(&ext.to_lowercase()))
}

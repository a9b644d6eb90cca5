//! Link classification
//!
//! Partitions the anchors of a fetched page into same-origin page links and
//! downloadable file links. Pure function of the parsed markup and the URLs
//! involved; the two output sets are disjoint by construction.

use crate::url::{matches_extension, resolve_href, slash_count};
use scraper::{Html, Selector};
use std::collections::BTreeSet;

/// Slack allowed by the page-link breadth heuristic: a link is followed only
/// when its slash count is at most the parent's plus this value.
const SLASH_SLACK: usize = 2;

/// Classified links discovered on one page
#[derive(Debug, Default, Clone)]
pub struct LinkSets {
    /// Same-origin page candidates, subject to the slash-count heuristic
    pub pages: BTreeSet<String>,

    /// Downloadable file candidates, matched by extension
    pub files: BTreeSet<String>,
}

/// Classifies every anchor of a document into page and file links
///
/// Rules, applied per href after resolution against the origin prefix:
/// 1. A link ending with a recognized file extension (case-insensitive) is a
///    file link. This test runs first; a file link is never also a page link.
/// 2. Otherwise, a link is a page link iff it starts with the origin prefix
///    and its slash count does not exceed the parent URL's slash count + 2.
///
/// The slash-count rule is a deliberate breadth-bounding proxy for path
/// depth, preserved as-is (see `crate::url::slash_count`).
pub fn classify(
    document: &Html,
    parent_url: &str,
    origin_prefix: &str,
    extensions: &[String],
) -> LinkSets {
    let mut links = LinkSets::default();

    let selector = match Selector::parse("a[href]") {
        Ok(s) => s,
        Err(_) => return links,
    };

    let parent_slashes = slash_count(parent_url);

    for element in document.select(&selector) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let Some(resolved) = resolve_href(href, origin_prefix) else {
            continue;
        };

        if matches_extension(&resolved, extensions) {
            links.files.insert(resolved);
        } else if resolved.starts_with(origin_prefix)
            && slash_count(&resolved) <= parent_slashes + SLASH_SLACK
        {
            links.pages.insert(resolved);
        }
    }

    tracing::info!(
        "Found {} page links and {} file links on {}",
        links.pages.len(),
        links.files.len(),
        parent_url
    );

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_extensions() -> Vec<String> {
        vec![".txt".to_string(), ".csv".to_string(), ".pdf".to_string()]
    }

    fn classify_html(html: &str, parent: &str, prefix: &str) -> LinkSets {
        let document = Html::parse_document(html);
        classify(&document, parent, prefix, &default_extensions())
    }

    #[test]
    fn test_page_and_file_split() {
        let html = r#"<html><body>
            <a href="/about">About</a>
            <a href="/docs/report.pdf">Report</a>
        </body></html>"#;
        let links = classify_html(html, "https://x.test", "https://x.test");

        assert_eq!(links.pages.len(), 1);
        assert!(links.pages.contains("https://x.test/about"));
        assert_eq!(links.files.len(), 1);
        assert!(links.files.contains("https://x.test/docs/report.pdf"));
    }

    #[test]
    fn test_outputs_are_disjoint() {
        let html = r#"<html><body>
            <a href="/a">A</a>
            <a href="/a.txt">A file</a>
            <a href="/b.csv">B file</a>
            <a href="/b">B</a>
        </body></html>"#;
        let links = classify_html(html, "https://x.test", "https://x.test");

        assert!(links.pages.is_disjoint(&links.files));
        assert_eq!(links.pages.len(), 2);
        assert_eq!(links.files.len(), 2);
    }

    #[test]
    fn test_file_extension_case_insensitive() {
        let html = r#"<html><body><a href="/DATA.PDF">Data</a></body></html>"#;
        let links = classify_html(html, "https://x.test", "https://x.test");
        assert!(links.files.contains("https://x.test/DATA.PDF"));
    }

    #[test]
    fn test_foreign_origin_dropped() {
        let html = r#"<html><body><a href="https://other.test/page">Other</a></body></html>"#;
        let links = classify_html(html, "https://x.test", "https://x.test");
        assert!(links.pages.is_empty());
        assert!(links.files.is_empty());
    }

    #[test]
    fn test_foreign_origin_file_still_matched() {
        // The file test runs before the origin test, so off-origin files
        // are still collected for download.
        let html = r#"<html><body><a href="https://cdn.test/manual.pdf">Manual</a></body></html>"#;
        let links = classify_html(html, "https://x.test", "https://x.test");
        assert!(links.files.contains("https://cdn.test/manual.pdf"));
    }

    #[test]
    fn test_slash_count_heuristic_bounds_breadth() {
        // parent has 2 slashes; /a/b/c resolves to 5 slashes which exceeds 2+2
        let html = r#"<html><body>
            <a href="/a/b">Near</a>
            <a href="/a/b/c">Deep</a>
        </body></html>"#;
        let links = classify_html(html, "https://x.test", "https://x.test");

        assert!(links.pages.contains("https://x.test/a/b"));
        assert!(!links.pages.contains("https://x.test/a/b/c"));
    }

    #[test]
    fn test_special_scheme_hrefs_dropped() {
        let html = r##"<html><body>
            <a href="javascript:void(0)">JS</a>
            <a href="mailto:x@y.z">Mail</a>
            <a href="#top">Anchor</a>
        </body></html>"##;
        let links = classify_html(html, "https://x.test", "https://x.test");
        assert!(links.pages.is_empty());
        assert!(links.files.is_empty());
    }

    #[test]
    fn test_duplicate_hrefs_collapse() {
        let html = r#"<html><body>
            <a href="/about">One</a>
            <a href="/about">Two</a>
        </body></html>"#;
        let links = classify_html(html, "https://x.test", "https://x.test");
        assert_eq!(links.pages.len(), 1);
    }
}

//! Link discovery
//!
//! This module extracts `<a href>` targets from a page, resolves them
//! against the page URL and keeps the ones inside the crawl scope.
//!
//! A link is in scope when its absolute form starts with the crawl's base
//! URL string. This confines the crawl to one path subtree of one host,
//! which is stricter than same-domain matching.

use scraper::{Html, Selector};
use url::Url;

/// Extracts every resolvable link from a page, in document order
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` anywhere in the document, including nav and footer
///
/// **Exclude:**
/// - Pure in-page anchors (`href` starting with `#`)
/// - Hrefs that cannot be resolved against `page_url`
///
/// Relative, protocol-relative and absolute hrefs are all resolved with
/// standard URL joining. The result is not de-duplicated.
pub fn extract_links(html: &str, page_url: &Url) -> Vec<String> {
    let document = Html::parse_document(html);
    let Ok(selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(href, page_url))
        .collect()
}

/// Resolves an href against the page it appears on
fn resolve_link(href: &str, page_url: &Url) -> Option<String> {
    if href.starts_with('#') {
        return None;
    }

    page_url.join(href).ok().map(|url| url.to_string())
}

/// Whether a resolved link belongs to the crawl rooted at `base_url`
///
/// # Examples
///
/// ```
/// use docs_mirror::crawler::is_in_scope;
///
/// assert!(is_in_scope("https://test.com/docs/page2", "https://test.com/docs"));
/// assert!(!is_in_scope("https://test.com/blog", "https://test.com/docs"));
/// assert!(!is_in_scope("https://external.com", "https://test.com/docs"));
/// ```
pub fn is_in_scope(candidate: &str, base_url: &str) -> bool {
    candidate.starts_with(base_url)
}

/// Writes a base URL the way resolved links are written
///
/// Resolved links come out of [`Url::join`] with a lowercase host, no
/// default port and percent-encoded paths, so the scope prefix must use the
/// same form. A base URL that does not parse is returned unchanged.
///
/// # Examples
///
/// ```
/// use docs_mirror::crawler::scope_root;
///
/// assert_eq!(scope_root("https://Docs.Example.com:443/guide/"), "https://docs.example.com/guide/");
/// assert_eq!(scope_root("not a url"), "not a url");
/// ```
pub fn scope_root(base_url: &str) -> String {
    match Url::parse(base_url) {
        Ok(url) => url.to_string(),
        Err(_) => base_url.to_string(),
    }
}

/// Discovers in-scope links on a page, in order of first appearance
///
/// Duplicates within the page are dropped; filtering against URLs already
/// visited or queued is left to the frontier.
pub fn discover(page_url: &Url, html: &str, base_url: &str) -> Vec<String> {
    let root = scope_root(base_url);
    let mut seen = std::collections::HashSet::new();

    extract_links(html, page_url)
        .into_iter()
        .filter(|link| is_in_scope(link, &root))
        .filter(|link| seen.insert(link.clone()))
        .collect()
}

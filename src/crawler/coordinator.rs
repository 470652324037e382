//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop that ties together:
//! - The traversal frontier
//! - Page fetching
//! - Link discovery
//! - Content extraction and Markdown conversion
//! - Aggregation of page blocks

use crate::content::page_text;
use crate::crawler::aggregate::AggregatedDocument;
use crate::crawler::fetcher::{FetchResult, PageFetcher};
use crate::crawler::frontier::Frontier;
use crate::crawler::links::{discover, scope_root};
use std::time::Instant;
use url::Url;

/// Counters collected during one crawl
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrawlStats {
    /// Pages fetched successfully
    pub pages_fetched: usize,

    /// Pages whose fetch failed (dropped for this crawl)
    pub pages_failed: usize,

    /// Fetched pages that produced no text
    pub pages_empty: usize,

    /// URLs added to the frontier, seed excluded
    pub links_queued: usize,
}

/// Result of a crawl
#[derive(Debug, Clone)]
pub struct CrawlOutput {
    pub document: AggregatedDocument,
    pub stats: CrawlStats,
}

/// Breadth-first crawler over one documentation tree per call
///
/// The crawler itself is stateless between calls: every [`Crawler::crawl`]
/// builds and drops its own frontier, so one instance can process several
/// targets in sequence.
pub struct Crawler<F> {
    fetcher: F,
}

impl<F: PageFetcher> Crawler<F> {
    /// Creates a crawler using the given fetcher
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// Returns the underlying fetcher
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Crawls every page under `base_url`
    ///
    /// # Traversal
    ///
    /// 1. Start with the frontier `[base_url]`, written in resolved-URL form
    /// 2. Dequeue the head URL and mark it visited
    /// 3. Fetch it; on failure log and move on (no retry)
    /// 4. Queue new in-scope links found in the raw HTML
    /// 5. Append the page's text, if any, to the aggregate
    /// 6. Stop when the frontier is empty
    ///
    /// Pages are fetched one at a time and each URL at most once.
    pub async fn crawl(&self, base_url: &str) -> CrawlOutput {
        let root = scope_root(base_url);
        let base_url = root.as_str();
        tracing::info!("Starting crawl of {}", base_url);

        let start_time = Instant::now();
        let mut frontier = Frontier::new(base_url);
        let mut document = AggregatedDocument::new();
        let mut stats = CrawlStats::default();

        while let Some(url) = frontier.next_url() {
            tracing::info!("Scraping: {}", url);

            let body = match self.fetcher.fetch(&url).await {
                FetchResult::Success { body, .. } => body,
                FetchResult::HttpError { status_code } => {
                    tracing::warn!("Failed to fetch {}: HTTP {}", url, status_code);
                    stats.pages_failed += 1;
                    continue;
                }
                FetchResult::NetworkError { error } => {
                    tracing::warn!("Failed to fetch {}: {}", url, error);
                    stats.pages_failed += 1;
                    continue;
                }
            };
            stats.pages_fetched += 1;

            let (links, text) = process_page(&url, &body, base_url);

            for link in links {
                if frontier.push(&link) {
                    tracing::debug!("Queued {}", link);
                    stats.links_queued += 1;
                }
            }

            if !document.push(&url, &text) {
                tracing::debug!("No content extracted from {}", url);
                stats.pages_empty += 1;
            }

            if stats.pages_fetched % 10 == 0 {
                tracing::info!(
                    "Progress: {} pages fetched, {} in frontier",
                    stats.pages_fetched,
                    frontier.pending()
                );
            }
        }

        tracing::info!(
            "Crawl of {} completed: {} pages fetched, {} failed, {} blocks in {:?}",
            base_url,
            stats.pages_fetched,
            stats.pages_failed,
            document.block_count(),
            start_time.elapsed()
        );

        CrawlOutput { document, stats }
    }
}

/// Runs link discovery and text extraction over one fetched page
///
/// Both passes read the same raw HTML; link discovery sees links inside
/// navigation and footers that extraction later drops.
fn process_page(url: &str, body: &str, base_url: &str) -> (Vec<String>, String) {
    let links = match Url::parse(url) {
        Ok(page_url) => discover(&page_url, body, base_url),
        Err(e) => {
            tracing::warn!("Cannot resolve links on {}: {}", url, e);
            Vec::new()
        }
    };

    (links, page_text(body))
}

/// Crawls `base_url` and returns the aggregated text
///
/// Empty when no page yielded content.
pub async fn crawl<F: PageFetcher>(base_url: &str, fetcher: F) -> String {
    Crawler::new(fetcher).crawl(base_url).await.document.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory site that records every fetch
    #[derive(Default)]
    struct FakeSite {
        pages: HashMap<String, String>,
        fetched: Mutex<Vec<String>>,
    }

    impl FakeSite {
        fn with_page(mut self, url: &str, html: &str) -> Self {
            self.pages.insert(url.to_string(), html.to_string());
            self
        }

        fn fetched(&self) -> Vec<String> {
            self.fetched.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageFetcher for FakeSite {
        async fn fetch(&self, url: &str) -> FetchResult {
            self.fetched.lock().unwrap().push(url.to_string());
            match self.pages.get(url) {
                Some(body) => FetchResult::Success {
                    final_url: url.to_string(),
                    status_code: 200,
                    body: body.clone(),
                },
                None => FetchResult::HttpError { status_code: 404 },
            }
        }
    }

    #[tokio::test]
    async fn test_two_page_crawl_in_order() {
        let site = FakeSite::default()
            .with_page(
                "https://test.com/docs",
                r#"<main><h1>Main Title</h1><a href="/docs/page2">Page 2</a><a href="https://external.com">Ext</a></main>"#,
            )
            .with_page(
                "https://test.com/docs/page2",
                "<html><body><main><h2>Page 2 Content</h2></main></body></html>",
            );

        let crawler = Crawler::new(site);
        let output = crawler.crawl("https://test.com/docs").await;

        let blocks = output.document.blocks();
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].url, "https://test.com/docs");
        assert!(blocks[0].text.contains("# Main Title"));
        assert_eq!(blocks[1].url, "https://test.com/docs/page2");
        assert!(blocks[1].text.contains("## Page 2 Content"));

        assert_eq!(
            crawler.fetcher().fetched(),
            vec!["https://test.com/docs", "https://test.com/docs/page2"]
        );
        assert_eq!(output.stats.pages_fetched, 2);
        assert_eq!(output.stats.links_queued, 1);
    }

    #[tokio::test]
    async fn test_base_url_written_in_resolved_form() {
        let site = FakeSite::default()
            .with_page(
                "https://docs.example.com/guide/",
                r#"<nav><a href="page2">Two</a></nav><main><p>Start</p></main>"#,
            )
            .with_page(
                "https://docs.example.com/guide/page2",
                r#"<main><p>Second</p><a href="/guide/">Back</a></main>"#,
            );

        let crawler = Crawler::new(site);
        let output = crawler.crawl("https://Docs.Example.com:443/guide/").await;

        assert_eq!(
            crawler.fetcher().fetched(),
            vec![
                "https://docs.example.com/guide/",
                "https://docs.example.com/guide/page2"
            ]
        );
        assert_eq!(output.document.block_count(), 2);
        assert_eq!(output.stats.links_queued, 1);
    }

    #[tokio::test]
    async fn test_breadth_first_order_and_single_fetch() {
        // root -> b, c ; b -> root, c, d ; c -> b, d
        let site = FakeSite::default()
            .with_page(
                "https://t.com/",
                r#"<p>Root</p><a href="/b">b</a><a href="/c">c</a>"#,
            )
            .with_page(
                "https://t.com/b",
                r#"<p>B</p><a href="/">root</a><a href="/c">c</a><a href="/d">d</a>"#,
            )
            .with_page(
                "https://t.com/c",
                r#"<p>C</p><a href="/b">b</a><a href="/d">d</a>"#,
            )
            .with_page("https://t.com/d", "<p>D</p>");

        let crawler = Crawler::new(site);
        let output = crawler.crawl("https://t.com/").await;

        let fetched = crawler.fetcher().fetched();
        assert_eq!(
            fetched,
            vec![
                "https://t.com/",
                "https://t.com/b",
                "https://t.com/c",
                "https://t.com/d"
            ]
        );
        assert_eq!(output.document.block_count(), 4);
    }

    #[tokio::test]
    async fn test_failed_page_is_skipped() {
        let site = FakeSite::default()
            .with_page(
                "https://t.com/docs/",
                r#"<p>Root</p><a href="missing">gone</a><a href="ok">ok</a>"#,
            )
            .with_page("https://t.com/docs/ok", "<p>Fine</p>");

        let crawler = Crawler::new(site);
        let output = crawler.crawl("https://t.com/docs/").await;

        assert_eq!(output.stats.pages_failed, 1);
        assert_eq!(output.document.block_count(), 2);
        assert_eq!(
            crawler.fetcher().fetched(),
            vec![
                "https://t.com/docs/",
                "https://t.com/docs/missing",
                "https://t.com/docs/ok"
            ]
        );
    }

    #[tokio::test]
    async fn test_empty_page_contributes_no_block() {
        let site = FakeSite::default()
            .with_page(
                "https://t.com/docs/",
                r#"<html><body><nav><a href="/docs/next">Next</a></nav><footer>f</footer><script>x()</script></body></html>"#,
            )
            .with_page("https://t.com/docs/next", "<main><p>Next page</p></main>");

        let crawler = Crawler::new(site);
        let output = crawler.crawl("https://t.com/docs/").await;

        assert_eq!(output.stats.pages_empty, 1);
        assert_eq!(output.document.block_count(), 1);
        assert_eq!(output.document.blocks()[0].url, "https://t.com/docs/next");
    }

    #[tokio::test]
    async fn test_crawl_returns_joined_text() {
        let site = FakeSite::default()
            .with_page(
                "https://t.com/docs",
                r#"<nav><a href="/docs/2">2</a></nav><main><p>One</p></main>"#,
            )
            .with_page("https://t.com/docs/2", "<main><p>Two</p></main>");

        let text = crawl("https://t.com/docs", site).await;
        assert_eq!(
            text,
            "<!-- Source: https://t.com/docs -->\nOne\n\n---\n\n<!-- Source: https://t.com/docs/2 -->\nTwo"
        );
    }

    #[tokio::test]
    async fn test_no_content_yields_empty_string() {
        let text = crawl("https://t.com/docs", FakeSite::default()).await;
        assert_eq!(text, "");
    }
}

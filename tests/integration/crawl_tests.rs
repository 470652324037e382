//! Integration tests for the crawler
//!
//! These tests use wiremock to serve a small documentation site and run
//! the full fetch, extract and aggregate cycle against it.

use docs_mirror::config::FetchConfig;
use docs_mirror::crawler::{crawl, Crawler, HttpFetcher};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn html(body: String) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_string(body)
        .insert_header("content-type", "text/html")
}

fn fetcher() -> HttpFetcher {
    HttpFetcher::new(&FetchConfig::default()).expect("Failed to build HTTP client")
}

#[tokio::test]
async fn test_two_page_site_external_link_never_fetched() {
    let docs = MockServer::start().await;
    let external = MockServer::start().await;
    let base_url = format!("{}/docs", docs.uri());

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(html(format!(
            r#"<html><body>
            <nav><a href="/docs/page2">Page 2</a></nav>
            <main><h1>Main Title</h1><p>Welcome.</p></main>
            <footer><a href="{}/elsewhere">Elsewhere</a></footer>
            </body></html>"#,
            external.uri()
        )))
        .expect(1)
        .mount(&docs)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/page2"))
        .respond_with(html(
            r#"<html><body><main><h2>Page 2 Content</h2>
            <a href="/docs">Back home</a></main></body></html>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&docs)
        .await;

    Mock::given(method("GET"))
        .respond_with(html("<p>should not be fetched</p>".to_string()))
        .expect(0)
        .mount(&external)
        .await;

    let crawler = Crawler::new(fetcher());
    let output = crawler.crawl(&base_url).await;

    let blocks = output.document.blocks();
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].url, base_url);
    assert!(blocks[0].text.starts_with("# Main Title"));
    assert_eq!(blocks[1].url, format!("{}/page2", base_url));
    assert!(blocks[1].text.contains("## Page 2 Content"));
    assert_eq!(output.stats.pages_fetched, 2);
    assert_eq!(output.stats.pages_failed, 0);

    let rendered = output.document.render();
    assert!(rendered.starts_with(&format!("<!-- Source: {} -->\n", base_url)));
    assert!(rendered.contains("\n\n---\n\n"));
    assert!(!rendered.contains("Elsewhere"));
}

#[tokio::test]
async fn test_body_fallback_without_main() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/guide/"))
        .respond_with(html(
            r#"<html><head><title>T</title><style>p{}</style></head><body>
            <header>Site header</header>
            <div><h3>Installing</h3><p>Run the installer.</p></div>
            <script>track()</script>
            </body></html>"#
                .to_string(),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let text = crawl(&format!("{}/guide/", server.uri()), fetcher()).await;

    assert!(text.contains("### Installing"));
    assert!(text.contains("Run the installer."));
    assert!(!text.contains("Site header"));
    assert!(!text.contains("track()"));
}

#[tokio::test]
async fn test_failed_pages_are_dropped() {
    let server = MockServer::start().await;
    let base_url = format!("{}/docs/", server.uri());

    Mock::given(method("GET"))
        .and(path("/docs/"))
        .respond_with(html(
            r#"<main><p>Index</p></main><nav><a href="broken">Broken</a><a href="ok">Ok</a></nav>"#
                .to_string(),
        ))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/broken"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/ok"))
        .respond_with(html("<main><p>Fine</p></main>".to_string()))
        .expect(1)
        .mount(&server)
        .await;

    let crawler = Crawler::new(fetcher());
    let output = crawler.crawl(&base_url).await;

    assert_eq!(output.stats.pages_failed, 1);
    assert_eq!(output.document.block_count(), 2);
}

#[tokio::test]
async fn test_unreachable_site_yields_empty_text() {
    let text = crawl("http://127.0.0.1:1/docs", fetcher()).await;
    assert_eq!(text, "");
}

//! End-to-end mirroring against mocked documentation and Google APIs

use docs_mirror::config::{FetchConfig, SinkConfig, SinkMode, Target};
use docs_mirror::crawler::{Crawler, HttpFetcher};
use docs_mirror::sink::{GoogleDocsSink, GoogleDriveSink, TokenProvider, TokenSource};
use docs_mirror::sync::{mirror_all, mirror_target, TargetError};
use serde_json::json;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn docs_site() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            r#"<html><body><nav><a href="/docs/api">API</a></nav>
            <main><h1>Guide</h1><p>Start here.</p></main></body></html>"#,
        ))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/docs/api"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string("<html><body><article><h2>API</h2><p>Call it.</p></article></body></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    server
}

fn crawler() -> Crawler<HttpFetcher> {
    Crawler::new(HttpFetcher::new(&FetchConfig::default()).expect("Failed to build HTTP client"))
}

fn tokens() -> TokenProvider {
    TokenProvider::new(reqwest::Client::new(), TokenSource::Static("test-token".to_string()))
}

#[tokio::test]
async fn test_mirror_into_drive_folder() {
    let site = docs_site().await;
    let drive = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/drive/v3/files"))
        .and(query_param(
            "q",
            "name='Guide.txt' and 'folder-1' in parents and trashed=false",
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"files": []})))
        .expect(1)
        .mount(&drive)
        .await;

    Mock::given(method("POST"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "created-1"})))
        .expect(1)
        .mount(&drive)
        .await;

    Mock::given(method("PATCH"))
        .and(path("/upload/drive/v3/files/created-1"))
        .and(body_string_contains("# Guide"))
        .and(body_string_contains("## API"))
        .and(body_string_contains("\n\n---\n\n"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&drive)
        .await;

    let sink = GoogleDriveSink::new(reqwest::Client::new(), tokens()).with_api_url(drive.uri());
    let target = Target {
        name: "Guide".to_string(),
        source_url: format!("{}/docs", site.uri()),
        destination_id: "folder-1".to_string(),
    };
    let sink_config = SinkConfig {
        mode: SinkMode::DriveFolder,
        max_words: 500_000,
    };

    let success = mirror_target(&crawler(), &sink, &target, &sink_config)
        .await
        .expect("mirror should succeed");

    assert_eq!(success.blocks, 2);
    assert_eq!(success.chunks, 1);
}

#[tokio::test]
async fn test_mirror_into_google_doc() {
    let site = docs_site().await;
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/documents/doc-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "body": {"content": [{"endIndex": 1}, {"startIndex": 1, "endIndex": 30}]}
        })))
        .expect(1)
        .mount(&api)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/documents/doc-1:batchUpdate"))
        .and(body_string_contains("deleteContentRange"))
        .and(body_string_contains("Start here."))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&api)
        .await;

    let sink = GoogleDocsSink::new(reqwest::Client::new(), tokens()).with_api_url(api.uri());
    let target = Target {
        name: "Guide".to_string(),
        source_url: format!("{}/docs", site.uri()),
        destination_id: "doc-1".to_string(),
    };
    let sink_config = SinkConfig {
        mode: SinkMode::Document,
        max_words: 500_000,
    };

    let reports = mirror_all(&crawler(), &sink, &[target], &sink_config).await;
    assert_eq!(reports.len(), 1);
    assert!(reports[0].is_success());
}

#[tokio::test]
async fn test_empty_site_does_not_touch_destination() {
    let site = MockServer::start().await;
    let api = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/docs"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "<html><body><nav>Menu</nav><footer>Foot</footer></body></html>",
        ))
        .mount(&site)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&api)
        .await;

    let sink = GoogleDocsSink::new(reqwest::Client::new(), tokens()).with_api_url(api.uri());
    let target = Target {
        name: "Empty".to_string(),
        source_url: format!("{}/docs", site.uri()),
        destination_id: "doc-1".to_string(),
    };

    let result = mirror_target(&crawler(), &sink, &target, &SinkConfig::default()).await;
    assert!(matches!(result, Err(TargetError::NoContent)));
}

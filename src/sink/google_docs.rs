//! Google Docs sink
//!
//! Replaces the whole body of an existing document through one
//! `batchUpdate` call: a delete of the current body followed by inserts.

use crate::sink::{check_status, http_error, Sink, TokenProvider, UpsertOutcome};
use crate::{SinkError, SinkResult};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

/// Base URL of the Google Docs API
pub const DOCS_API_URL: &str = "https://docs.googleapis.com";

/// Largest piece of text sent in a single insert request
pub const MAX_CHARS_PER_INSERT: usize = 500_000;

#[derive(Debug, Deserialize)]
struct Document {
    #[serde(default)]
    body: Option<Body>,
}

#[derive(Debug, Deserialize)]
struct Body {
    #[serde(default)]
    content: Vec<StructuralElement>,
}

#[derive(Debug, Deserialize)]
struct StructuralElement {
    #[serde(rename = "endIndex", default)]
    end_index: Option<i64>,
}

impl Document {
    /// Index just past the last insertable position
    ///
    /// A document always ends with a newline that cannot be deleted, so this
    /// is one less than the end index of the final structural element.
    fn end_index(&self) -> i64 {
        self.body
            .as_ref()
            .and_then(|body| body.content.last())
            .and_then(|element| element.end_index)
            .map(|end| end - 1)
            .unwrap_or(1)
    }
}

/// Builds the `batchUpdate` requests that turn the body into `text`
///
/// When the document holds content (`end_index > 1`) the range
/// `[1, end_index)` is deleted first. The text is then split on character
/// boundaries into pieces of at most [`MAX_CHARS_PER_INSERT`] characters.
/// Every piece is inserted at index 1, last piece first, so the final body
/// reads in order.
pub fn build_requests(end_index: i64, text: &str) -> Vec<Value> {
    let mut requests = Vec::new();

    if end_index > 1 {
        requests.push(json!({
            "deleteContentRange": {
                "range": { "startIndex": 1, "endIndex": end_index }
            }
        }));
    }

    let pieces = split_chars(text, MAX_CHARS_PER_INSERT);
    for piece in pieces.into_iter().rev() {
        requests.push(json!({
            "insertText": {
                "location": { "index": 1 },
                "text": piece
            }
        }));
    }

    requests
}

fn split_chars(text: &str, max_chars: usize) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (offset, _) in text.char_indices() {
        if count == max_chars {
            pieces.push(&text[start..offset]);
            start = offset;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        pieces.push(&text[start..]);
    }

    pieces
}

/// Sink writing to Google Docs
pub struct GoogleDocsSink {
    client: Client,
    tokens: TokenProvider,
    api_url: String,
}

impl GoogleDocsSink {
    pub fn new(client: Client, tokens: TokenProvider) -> Self {
        Self {
            client,
            tokens,
            api_url: DOCS_API_URL.to_string(),
        }
    }

    /// Overrides the API base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn fetch_end_index(&self, document_id: &str, token: &str) -> SinkResult<i64> {
        let url = format!("{}/v1/documents/{}", self.api_url, document_id);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(http_error(&url))?;

        let what = format!("document {}", document_id);
        let document: Document = check_status(response, &what)
            .await?
            .json()
            .await
            .map_err(|e| SinkError::Decode(format!("{}: {}", what, e)))?;

        Ok(document.end_index())
    }
}

#[async_trait]
impl Sink for GoogleDocsSink {
    async fn replace_document(&self, destination_id: &str, text: &str) -> SinkResult<()> {
        let token = self.tokens.access_token().await?;
        let end_index = self.fetch_end_index(destination_id, &token).await?;

        let requests = build_requests(end_index, text);
        if requests.is_empty() {
            tracing::debug!("Document {} already empty, nothing to write", destination_id);
            return Ok(());
        }

        let url = format!("{}/v1/documents/{}:batchUpdate", self.api_url, destination_id);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({ "requests": requests }))
            .send()
            .await
            .map_err(http_error(&url))?;
        check_status(response, &format!("document {}", destination_id)).await?;

        tracing::info!(
            "Replaced document {} with {} characters",
            destination_id,
            text.chars().count()
        );
        Ok(())
    }

    async fn upsert_named_file(
        &self,
        _container_id: &str,
        _name: &str,
        _text: &str,
    ) -> SinkResult<UpsertOutcome> {
        Err(SinkError::Unsupported(
            "Google Docs destinations cannot hold named files",
        ))
    }
}

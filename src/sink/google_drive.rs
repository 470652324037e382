//! Google Drive sink
//!
//! Stores text as plain-text Drive files. A file is addressed either by id
//! (overwrite in place) or by name inside a folder (search, then update or
//! create).

use crate::sink::{check_status, http_error, Sink, TokenProvider, UpsertOutcome};
use crate::{SinkError, SinkResult};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

/// Base URL of the Google Drive API
pub const DRIVE_API_URL: &str = "https://www.googleapis.com";

const TEXT_MIME_TYPE: &str = "text/plain";
const UPLOAD_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

/// File name used for a mirrored document called `name`
pub fn drive_file_name(name: &str) -> String {
    format!("{}.txt", name)
}

/// Drive search expression matching `file_name` directly inside `folder_id`
pub fn search_query(folder_id: &str, file_name: &str) -> String {
    format!(
        "name='{}' and '{}' in parents and trashed=false",
        escape_literal(file_name),
        escape_literal(folder_id)
    )
}

fn escape_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

/// A Drive file as returned by search and create calls
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DriveFile {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

/// Sink writing to Google Drive
pub struct GoogleDriveSink {
    client: Client,
    tokens: TokenProvider,
    api_url: String,
}

impl GoogleDriveSink {
    pub fn new(client: Client, tokens: TokenProvider) -> Self {
        Self {
            client,
            tokens,
            api_url: DRIVE_API_URL.to_string(),
        }
    }

    /// Overrides the API base URL
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into().trim_end_matches('/').to_string();
        self
    }

    async fn find_file(
        &self,
        token: &str,
        folder_id: &str,
        file_name: &str,
    ) -> SinkResult<Option<String>> {
        let url = format!("{}/drive/v3/files", self.api_url);
        let query = search_query(folder_id, file_name);
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id, name)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await
            .map_err(http_error(&url))?;

        let what = format!("folder {}", folder_id);
        let list: FileList = check_status(response, &what)
            .await?
            .json()
            .await
            .map_err(|e| SinkError::Decode(format!("{}: {}", what, e)))?;

        if list.files.len() > 1 {
            tracing::warn!(
                "{} files named {} in folder {}, updating the first",
                list.files.len(),
                file_name,
                folder_id
            );
        }

        Ok(list.files.into_iter().next().map(|file| file.id))
    }

    async fn create_file(&self, token: &str, folder_id: &str, file_name: &str) -> SinkResult<String> {
        let url = format!("{}/drive/v3/files", self.api_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(token)
            .query(&[("supportsAllDrives", "true"), ("fields", "id")])
            .json(&json!({
                "name": file_name,
                "parents": [folder_id],
                "mimeType": TEXT_MIME_TYPE,
            }))
            .send()
            .await
            .map_err(http_error(&url))?;

        let what = format!("folder {}", folder_id);
        let file: DriveFile = check_status(response, &what)
            .await?
            .json()
            .await
            .map_err(|e| SinkError::Decode(format!("{}: {}", what, e)))?;

        Ok(file.id)
    }

    /// Lists the files these credentials can reach, trashed ones excluded
    pub async fn list_files(&self) -> SinkResult<Vec<DriveFile>> {
        let token = self.tokens.access_token().await?;
        let url = format!("{}/drive/v3/files", self.api_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("q", "trashed=false"),
                ("fields", "files(id, name)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await
            .map_err(http_error(&url))?;

        let list: FileList = check_status(response, "file listing")
            .await?
            .json()
            .await
            .map_err(|e| SinkError::Decode(format!("file listing: {}", e)))?;

        Ok(list.files)
    }

    async fn upload(&self, token: &str, file_id: &str, text: &str) -> SinkResult<()> {
        let url = format!("{}/upload/drive/v3/files/{}", self.api_url, file_id);
        let response = self
            .client
            .patch(&url)
            .bearer_auth(token)
            .query(&[("uploadType", "media"), ("supportsAllDrives", "true")])
            .header(CONTENT_TYPE, UPLOAD_CONTENT_TYPE)
            .body(text.to_string())
            .send()
            .await
            .map_err(http_error(&url))?;

        check_status(response, &format!("file {}", file_id)).await?;
        Ok(())
    }
}

#[async_trait]
impl Sink for GoogleDriveSink {
    async fn replace_document(&self, destination_id: &str, text: &str) -> SinkResult<()> {
        let token = self.tokens.access_token().await?;
        self.upload(&token, destination_id, text).await?;
        tracing::info!("Overwrote Drive file {}", destination_id);
        Ok(())
    }

    async fn upsert_named_file(
        &self,
        container_id: &str,
        name: &str,
        text: &str,
    ) -> SinkResult<UpsertOutcome> {
        let token = self.tokens.access_token().await?;
        let file_name = drive_file_name(name);

        let outcome = match self.find_file(&token, container_id, &file_name).await? {
            Some(id) => {
                self.upload(&token, &id, text).await?;
                tracing::info!("Updated {} ({})", file_name, id);
                UpsertOutcome::Updated(id)
            }
            None => {
                let id = self.create_file(&token, container_id, &file_name).await?;
                self.upload(&token, &id, text).await?;
                tracing::info!("Created {} ({})", file_name, id);
                UpsertOutcome::Created(id)
            }
        };

        Ok(outcome)
    }
}

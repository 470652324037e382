//! Destination sinks
//!
//! A sink persists aggregated text in remote storage. Two operations are
//! offered, matching the two ways a destination can be addressed:
//!
//! - [`Sink::replace_document`]: overwrite everything stored under an id
//! - [`Sink::upsert_named_file`]: create or overwrite a named item inside a
//!   container
//!
//! Both are create-or-replace, so running a sync twice leaves the same
//! result. Items written by an earlier run under names that are no longer
//! produced are left in place.

pub mod auth;
mod google_docs;
mod google_drive;

pub use auth::{TokenProvider, TokenSource, GOOGLE_SCOPES, GOOGLE_TOKEN_URL};
pub use google_docs::{build_requests, GoogleDocsSink, DOCS_API_URL, MAX_CHARS_PER_INSERT};
pub use google_drive::{drive_file_name, search_query, DriveFile, GoogleDriveSink, DRIVE_API_URL};

use crate::config::SinkMode;
use crate::{SinkError, SinkResult};
use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Outcome of a named-file upsert
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// No item had the name; a new one was created with this id
    Created(String),
    /// An existing item with this id was overwritten
    Updated(String),
}

/// Remote storage for mirrored text
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Sink: Send + Sync {
    /// Replaces the entire content stored at `destination_id` with `text`
    async fn replace_document(&self, destination_id: &str, text: &str) -> SinkResult<()>;

    /// Writes `text` to the item called `name` inside `container_id`,
    /// creating the item when it does not exist
    async fn upsert_named_file(
        &self,
        container_id: &str,
        name: &str,
        text: &str,
    ) -> SinkResult<UpsertOutcome>;
}

/// Builds the sink matching a configured mode
///
/// Google Docs backs [`SinkMode::Document`]; Google Drive backs the two
/// Drive modes.
pub fn build_sink(
    mode: SinkMode,
    tokens: TokenSource,
    timeout: Duration,
) -> SinkResult<Box<dyn Sink>> {
    let client = Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|source| SinkError::Http {
            url: "client builder".to_string(),
            source,
        })?;
    let provider = TokenProvider::new(client.clone(), tokens);

    let sink: Box<dyn Sink> = match mode {
        SinkMode::Document => Box::new(GoogleDocsSink::new(client, provider)),
        SinkMode::DriveFile | SinkMode::DriveFolder => {
            Box::new(GoogleDriveSink::new(client, provider))
        }
    };

    Ok(sink)
}

/// Maps a non-success API response to a [`SinkError`]
///
/// `what` names the resource for error messages.
pub(crate) async fn check_status(response: Response, what: &str) -> SinkResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(SinkError::NotFound(what.to_string())),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            Err(SinkError::Unauthorized(what.to_string()))
        }
        _ => {
            let message = response.text().await.unwrap_or_default();
            Err(SinkError::Api {
                status: status.as_u16(),
                message,
            })
        }
    }
}

/// Wraps a transport error with the URL it happened on
pub(crate) fn http_error(url: &str) -> impl FnOnce(reqwest::Error) -> SinkError + '_ {
    move |source| SinkError::Http {
        url: url.to_string(),
        source,
    }
}

//! Per-target mirroring
//!
//! Ties the crawler to a sink: crawl the target, normalize the aggregated
//! text and write it to the destination according to the sink mode. Every
//! target produces its own [`TargetReport`]; a failing target never stops
//! the ones after it.

mod report;

pub use report::print_report;

use crate::config::{SinkConfig, SinkMode, Target};
use crate::crawler::{CrawlStats, Crawler, PageFetcher};
use crate::sink::{Sink, UpsertOutcome};
use crate::text::{chunk, normalize, part_name, word_count};
use crate::SinkError;
use thiserror::Error;

/// Why a target was not mirrored
#[derive(Debug, Error)]
pub enum TargetError {
    /// The crawl produced no text; the destination was left untouched
    #[error("no content produced")]
    NoContent,

    #[error("sink failed: {0}")]
    Sink(#[from] SinkError),
}

/// Summary of a successfully mirrored target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetSuccess {
    /// Page blocks in the aggregated text
    pub blocks: usize,

    /// Items written to the destination
    pub chunks: usize,

    /// Words in the normalized text
    pub words: usize,
}

/// Outcome of one target
#[derive(Debug)]
pub struct TargetReport {
    pub name: String,
    pub outcome: Result<TargetSuccess, TargetError>,
}

impl TargetReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Normalized text of one crawled target
#[derive(Debug, Clone)]
pub struct TargetText {
    pub text: String,
    pub blocks: usize,
    pub stats: CrawlStats,
}

/// Crawls a target and returns its normalized text
pub async fn collect_text<F: PageFetcher>(crawler: &Crawler<F>, target: &Target) -> TargetText {
    let output = crawler.crawl(&target.source_url).await;
    let text = normalize(&output.document.render());

    TargetText {
        text,
        blocks: output.document.block_count(),
        stats: output.stats,
    }
}

/// Writes already-collected text to the destination of `target`
///
/// Empty text is rejected with [`TargetError::NoContent`] before the sink is
/// touched.
pub async fn write_target<S: Sink + ?Sized>(
    sink: &S,
    target: &Target,
    sink_config: &SinkConfig,
    collected: &TargetText,
) -> Result<TargetSuccess, TargetError> {
    if collected.blocks == 0 || collected.text.trim().is_empty() {
        return Err(TargetError::NoContent);
    }

    let text = &collected.text;
    let words = word_count(text);

    let chunks = match sink_config.mode {
        SinkMode::Document | SinkMode::DriveFile => {
            sink.replace_document(&target.destination_id, text).await?;
            1
        }
        SinkMode::DriveFolder => {
            let parts = chunk(text, sink_config.max_words);
            let total = parts.len();
            tracing::info!("Uploading {} in {} part(s)", target.name, total);

            for (index, part) in parts.iter().enumerate() {
                let name = part_name(&target.name, index + 1, total);
                match sink
                    .upsert_named_file(&target.destination_id, &name, part)
                    .await?
                {
                    UpsertOutcome::Created(id) => tracing::debug!("Created {} as {}", name, id),
                    UpsertOutcome::Updated(id) => tracing::debug!("Updated {} ({})", name, id),
                }
            }
            total
        }
    };

    Ok(TargetSuccess {
        blocks: collected.blocks,
        chunks,
        words,
    })
}

/// Crawls one target and writes the result to the sink
pub async fn mirror_target<F, S>(
    crawler: &Crawler<F>,
    sink: &S,
    target: &Target,
    sink_config: &SinkConfig,
) -> Result<TargetSuccess, TargetError>
where
    F: PageFetcher,
    S: Sink + ?Sized,
{
    let collected = collect_text(crawler, target).await;
    write_target(sink, target, sink_config, &collected).await
}

/// Mirrors every target in order
///
/// Failures are logged and recorded in the returned reports.
pub async fn mirror_all<F, S>(
    crawler: &Crawler<F>,
    sink: &S,
    targets: &[Target],
    sink_config: &SinkConfig,
) -> Vec<TargetReport>
where
    F: PageFetcher,
    S: Sink + ?Sized,
{
    let mut reports = Vec::with_capacity(targets.len());

    for target in targets {
        tracing::info!("Mirroring {} from {}", target.name, target.source_url);

        let outcome = mirror_target(crawler, sink, target, sink_config).await;
        match &outcome {
            Ok(success) => tracing::info!(
                "Mirrored {}: {} blocks, {} words in {} item(s)",
                target.name,
                success.blocks,
                success.words,
                success.chunks
            ),
            Err(TargetError::NoContent) => {
                tracing::error!("Skipping {}: no content produced", target.name)
            }
            Err(e) => tracing::error!("Failed to mirror {}: {}", target.name, e),
        }

        reports.push(TargetReport {
            name: target.name.clone(),
            outcome,
        });
    }

    reports
}

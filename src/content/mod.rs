//! Page content processing
//!
//! This module turns raw page HTML into the text that ends up in the
//! aggregated document:
//! - Noise removal and content-region selection
//! - HTML to Markdown conversion

mod extract;
mod markdown;

pub use extract::{extract, CONTENT_REGIONS, REMOVED_TAGS};
pub use markdown::to_markdown;

/// Converts a raw page into its Markdown text block
///
/// Returns an empty string when the page has no content left after noise
/// removal.
pub fn page_text(html: &str) -> String {
    to_markdown(&extract(html))
}

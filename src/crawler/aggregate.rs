//! Aggregated output of a crawl
//!
//! Every page that yields text contributes one block:
//!
//! ```text
//! <!-- Source: https://example.com/docs/page -->
//! # Page title
//! ...
//! ```
//!
//! Blocks are joined in visitation order by a horizontal rule flanked by
//! blank lines.

/// Separator placed between page blocks
pub const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

/// Text contributed by one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageBlock {
    /// Source URL of the page
    pub url: String,

    /// Trimmed Markdown text of the page
    pub text: String,
}

impl PageBlock {
    /// Formats the block with its provenance marker
    pub fn render(&self) -> String {
        format!("<!-- Source: {} -->\n{}", self.url, self.text)
    }
}

/// Append-only sequence of page blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatedDocument {
    blocks: Vec<PageBlock>,
}

impl AggregatedDocument {
    /// Creates an empty document
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a page's text
    ///
    /// Text that is empty after trimming is ignored; returns whether a block
    /// was added.
    pub fn push(&mut self, url: &str, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }

        self.blocks.push(PageBlock {
            url: url.to_string(),
            text: text.to_string(),
        });
        true
    }

    /// Blocks in visitation order
    pub fn blocks(&self) -> &[PageBlock] {
        &self.blocks
    }

    /// Number of pages that contributed text
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Whether no page contributed text
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Joins all blocks into the aggregated text; empty when there are none
    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(PageBlock::render)
            .collect::<Vec<_>>()
            .join(BLOCK_SEPARATOR)
    }
}

//! Text post-processing for aggregated documents
//!
//! - Blank-line normalization
//! - Word-bounded, line-aligned chunking for size-limited destinations

mod chunk;
mod normalize;

pub use chunk::{chunk, part_name, word_count, LINE_SEPARATOR};
pub use normalize::normalize;

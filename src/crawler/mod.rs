//! Crawler module for documentation trees
//!
//! This module contains the crawl-and-transform core:
//! - HTTP fetching with a bounded timeout
//! - Link extraction and scope filtering
//! - The breadth-first traversal frontier
//! - Aggregation of page text into one document

mod aggregate;
mod coordinator;
mod fetcher;
mod frontier;
mod links;

pub use aggregate::{AggregatedDocument, PageBlock, BLOCK_SEPARATOR};
pub use coordinator::{crawl, CrawlOutput, CrawlStats, Crawler};
pub use fetcher::{build_http_client, fetch_url, FetchResult, HttpFetcher, PageFetcher};
pub use frontier::Frontier;
pub use links::{discover, extract_links, is_in_scope, scope_root};

//! Scrape pipeline: fetch, walk, parse, download, orchestrate
//!
//! This module contains the core pipeline logic, including:
//! - Resilient HTTP fetching with bounded retry
//! - Catalog page walking and link extraction
//! - Detail page parsing into metadata records
//! - Asset persistence
//! - Overall run orchestration

mod downloader;
mod fetcher;
mod orchestrator;
mod parser;
mod walker;

pub use downloader::{download, sanitize_filename};
pub use fetcher::{FetchOutcome, Fetcher, TextOutcome};
pub use orchestrator::Orchestrator;
pub use parser::{parse_detail_page, BookRecord};
pub use walker::{extract_book_links, walk, BookReference, WalkOutcome};

use crate::config::RunConfig;
use crate::output::RunSummary;
use crate::Result;

/// Runs a complete scrape with the given configuration
///
/// Convenience entry point: builds the [`Orchestrator`] and drives it to
/// completion, returning the run summary.
pub async fn scrape(config: RunConfig) -> Result<RunSummary> {
    Orchestrator::new(config)?.run().await
}

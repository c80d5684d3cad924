//! Run orchestrator - drives the whole scrape pipeline
//!
//! Per book: fetch detail page, parse metadata, download the text asset,
//! download the cover image, record. Failures are isolated per book: a
//! detail page that cannot be fetched or parsed skips that book with a
//! logged warning and the loop continues. Only listing-page discovery
//! failures stop anything, and even then the references discovered on
//! earlier pages are still processed.

use crate::config::RunConfig;
use crate::output::{self, RunSummary};
use crate::pipeline::downloader::{download, sanitize_filename};
use crate::pipeline::fetcher::{Fetcher, TextOutcome};
use crate::pipeline::parser::{parse_detail_page, BookRecord};
use crate::pipeline::walker::{walk, BookReference};
use crate::site;
use crate::{Result, ScrapeError};
use std::path::PathBuf;

/// Orchestrates one scrape run over an immutable [`RunConfig`]
pub struct Orchestrator {
    config: RunConfig,
    fetcher: Fetcher,
}

impl Orchestrator {
    /// Creates an orchestrator, validating the configuration and building
    /// the shared HTTP client
    pub fn new(config: RunConfig) -> Result<Self> {
        crate::config::validate(&config)?;
        let fetcher = Fetcher::new(config.max_attempts, config.retry_delay)?;
        Ok(Self { config, fetcher })
    }

    /// Runs the pipeline: walk the catalog, process every discovered book,
    /// then persist all records as one JSON array
    ///
    /// The metadata file is written once, at the end, so an interrupted
    /// run never leaves malformed concatenated JSON behind.
    pub async fn run(&self) -> Result<RunSummary> {
        let start_time = std::time::Instant::now();

        let outcome = walk(&self.fetcher, &self.config).await?;
        if let Some(e) = &outcome.aborted {
            tracing::error!(
                "Discovery aborted ({}); processing the {} books found so far",
                e,
                outcome.references.len()
            );
        }

        let mut summary = RunSummary {
            discovered: outcome.references.len(),
            ..RunSummary::default()
        };
        let mut records = Vec::new();

        for (index, book) in outcome.references.iter().enumerate() {
            match self.process_book(book, &mut summary).await {
                Ok(record) => {
                    records.push(record);
                    summary.recorded += 1;
                }
                Err(e) => {
                    tracing::warn!("Skipping book {}: {}", book.url, e);
                    summary.skipped += 1;
                }
            }

            let processed = index + 1;
            if processed % 10 == 0 {
                let rate = processed as f64 / start_time.elapsed().as_secs_f64();
                tracing::info!(
                    "Progress: {}/{} books, {:.2} books/sec",
                    processed,
                    summary.discovered,
                    rate
                );
            }
        }

        output::write_records(&self.config.output_path, &records)?;
        tracing::info!(
            "Run complete: {} recorded, {} skipped in {:?}",
            summary.recorded,
            summary.skipped,
            start_time.elapsed()
        );

        Ok(summary)
    }

    /// Processes a single book through fetch, parse, and both downloads
    ///
    /// Returns the finished record; any error here means the whole book
    /// is skipped. Missing assets are not errors: they leave the record's
    /// remote URL / null path in place and bump the summary counters.
    async fn process_book(
        &self,
        book: &BookReference,
        summary: &mut RunSummary,
    ) -> Result<BookRecord> {
        let body = match self.fetcher.fetch_text(&book.url).await? {
            TextOutcome::Success { body, .. } => body,
            TextOutcome::NotFound => {
                return Err(ScrapeError::NotFound {
                    url: book.url.to_string(),
                })
            }
            TextOutcome::HttpError { status } => {
                return Err(ScrapeError::HttpStatus {
                    url: book.url.to_string(),
                    status,
                })
            }
        };

        let mut record = parse_detail_page(&book.url, &body, self.config.normalization)?;

        if !self.config.skip_text {
            match self.download_text(book, &record.title).await? {
                Some(path) => record.book_path = Some(path.to_string_lossy().into_owned()),
                None => summary.text_missing += 1,
            }
        }

        if !self.config.skip_images {
            match self.download_image(&record.img_src).await? {
                Some(path) => record.img_src = path.to_string_lossy().into_owned(),
                None => summary.images_missing += 1,
            }
        }

        Ok(record)
    }

    /// Downloads the book text to `<dest>/books/<id>. <title>.txt`
    async fn download_text(&self, book: &BookReference, title: &str) -> Result<Option<PathBuf>> {
        let url = site::text_download_url(&self.config.catalog_url, book.id)?;
        let filename = sanitize_filename(&format!("{}. {}.txt", book.id, title));
        let folder = self.config.dest_dir.join("books");
        download(&self.fetcher, &url, &filename, &folder).await
    }

    /// Downloads the cover image to `<dest>/images/<original filename>`
    async fn download_image(&self, img_src: &str) -> Result<Option<PathBuf>> {
        let url = url::Url::parse(img_src)?;
        let Some(filename) = site::image_filename_from_url(&url) else {
            tracing::warn!("Image URL {} has no filename, skipping", url);
            return Ok(None);
        };
        let folder = self.config.dest_dir.join("images");
        download(&self.fetcher, &url, &filename, &folder).await
    }
}

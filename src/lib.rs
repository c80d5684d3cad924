//! Bookshelf-Scraper: a book catalog scraper
//!
//! This crate walks a paginated book catalog, fetches each book's detail
//! page, extracts metadata (title, author, cover image, genres, comments),
//! downloads the associated text and image assets, and persists the
//! collected records as a single JSON array.

pub mod config;
pub mod output;
pub mod pipeline;
pub mod site;

use thiserror::Error;

/// Main error type for Bookshelf-Scraper operations
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Resource does not exist (redirect-as-not-found): {url}")]
    NotFound { url: String },

    #[error("Retries exhausted for {url} after {attempts} attempts")]
    RetriesExhausted { url: String, attempts: u32 },

    #[error("Listing page {page} failed with HTTP {status}")]
    ListingPage { page: u32, status: u16 },

    #[error("Parse error for {url}: {message}")]
    Parse { url: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Bookshelf-Scraper operations
pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::{NormalizationPolicy, RunConfig};
pub use output::RunSummary;
pub use pipeline::{BookRecord, BookReference, FetchOutcome, Fetcher, Orchestrator};

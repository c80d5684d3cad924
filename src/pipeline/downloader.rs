//! Asset downloader
//!
//! Persists a fetched asset (book text or cover image) to a target folder.
//! A missing remote asset is expected and non-fatal: the download reports
//! it and returns `None`. Local filesystem trouble is a real error.

use crate::pipeline::fetcher::{FetchOutcome, Fetcher};
use crate::ScrapeError;
use std::path::{Path, PathBuf};
use url::Url;

/// Downloads `url` into `folder` under a sanitized `filename`
///
/// - Creates the folder if needed (idempotent).
/// - `NotFound`, HTTP errors, and exhausted retries are logged and map to
///   `Ok(None)` — the run continues without this asset.
/// - On success the payload is written to a `.part` file and renamed into
///   place, so an interrupted run never leaves a truncated file under
///   the final name. Existing files are overwritten.
pub async fn download(
    fetcher: &Fetcher,
    url: &Url,
    filename: &str,
    folder: &Path,
) -> Result<Option<PathBuf>, ScrapeError> {
    let body = match fetcher.fetch(url).await {
        Ok(FetchOutcome::Success { body, .. }) => body,
        Ok(FetchOutcome::NotFound) => {
            tracing::warn!("Asset {} does not exist, skipping", url);
            return Ok(None);
        }
        Ok(FetchOutcome::HttpError { status }) => {
            tracing::warn!("Asset {} failed with HTTP {}, skipping", url, status);
            return Ok(None);
        }
        Err(ScrapeError::RetriesExhausted { url, attempts }) => {
            tracing::warn!("Asset {} unreachable after {} attempts, skipping", url, attempts);
            return Ok(None);
        }
        Err(e) => return Err(e),
    };

    std::fs::create_dir_all(folder)?;

    let target = folder.join(sanitize_filename(filename));
    let part = target.with_extension(part_extension(&target));
    std::fs::write(&part, &body)?;
    std::fs::rename(&part, &target)?;

    tracing::debug!("Saved {} ({} bytes) to {}", url, body.len(), target.display());
    Ok(Some(target))
}

/// Replaces characters that are illegal or hazardous in filenames
///
/// Path separators, reserved punctuation, and control characters become
/// `_`; everything else (including non-ASCII letters) passes through so
/// the name stays human-identifiable. The extension survives because `.`
/// is kept.
pub fn sanitize_filename(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    cleaned.trim().trim_matches('.').trim().to_string()
}

/// Extension for the in-progress part file, preserving the original one
/// (`42.jpg` -> `42.jpg.part`)
fn part_extension(target: &Path) -> String {
    match target.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.part", ext),
        None => "part".to_string(),
    }
}

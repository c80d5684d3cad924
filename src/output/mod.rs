//! Output module: metadata persistence and run summary
//!
//! The collected records are written once, at the end of a run, as a
//! single pretty-printed JSON array. Non-ASCII characters are emitted
//! literally (serde_json does not escape them), so titles and comments
//! stay readable in the file.

use crate::pipeline::BookRecord;
use crate::Result;
use std::path::Path;

/// Counters accumulated over one scrape run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Books discovered by the catalog walk
    pub discovered: usize,

    /// Books fully processed and recorded (possibly with missing assets)
    pub recorded: usize,

    /// Books skipped because the detail page failed to fetch or parse
    pub skipped: usize,

    /// Recorded books whose text download failed
    pub text_missing: usize,

    /// Recorded books whose cover image download failed
    pub images_missing: usize,
}

/// Writes all records to `path` as one JSON array
///
/// The array is serialized to a sibling temp file first and renamed over
/// the target, so an interrupted write cannot leave truncated JSON under
/// the output name. Any existing file is replaced wholesale: reruns never
/// produce concatenated or duplicate output.
pub fn write_records(path: &Path, records: &[BookRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let json = serde_json::to_vec_pretty(records)?;

    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = std::path::PathBuf::from(tmp);

    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;

    tracing::info!("Wrote {} records to {}", records.len(), path.display());
    Ok(())
}

/// Prints a run summary to stdout
pub fn print_summary(summary: &RunSummary) {
    println!("=== Scrape Summary ===");
    println!("  Books discovered:   {}", summary.discovered);
    println!("  Books recorded:     {}", summary.recorded);
    println!("  Books skipped:      {}", summary.skipped);
    println!("  Texts missing:      {}", summary.text_missing);
    println!("  Images missing:     {}", summary.images_missing);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> BookRecord {
        BookRecord {
            title: "Алиса в стране чудес".to_string(),
            author: "Льюис Кэрролл".to_string(),
            img_src: "https://tululu.org/shots/42.jpg".to_string(),
            comments: vec!["Отличная книга!".to_string()],
            genres: vec!["Сказки".to_string()],
            book_path: None,
        }
    }

    #[test]
    fn test_write_records_produces_single_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");

        write_records(&path, &[sample_record(), sample_record()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_non_ascii_emitted_literally() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");

        write_records(&path, &[sample_record()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Алиса в стране чудес"));
        assert!(!content.contains("\\u"));
    }

    #[test]
    fn test_rerun_overwrites_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");

        write_records(&path, &[sample_record(), sample_record()]).unwrap();
        write_records(&path, &[sample_record()]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_null_book_path_serialized() {
        let json = serde_json::to_value(sample_record()).unwrap();
        assert!(json["book_path"].is_null());
        assert_eq!(json["title"], "Алиса в стране чудес");
    }

    #[test]
    fn test_empty_run_still_writes_valid_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books.json");

        write_records(&path, &[]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim(), "[]");
    }
}

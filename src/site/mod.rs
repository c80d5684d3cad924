//! URL construction for the target catalog site
//!
//! The site exposes a paginated listing, per-book detail pages at `/b<id>/`,
//! and a raw-text download endpoint keyed by numeric id. All construction
//! and extraction of those URLs lives here so the site-specific shapes stay
//! out of the pipeline logic.

use url::Url;

/// Builds the listing URL for a given page number
///
/// Page numbers are appended as a path segment relative to the catalog
/// base, e.g. `https://tululu.org/l55/` + `2` -> `https://tululu.org/l55/2`.
pub fn listing_page_url(catalog_url: &Url, page: u32) -> Result<Url, url::ParseError> {
    catalog_url.join(&page.to_string())
}

/// Builds the raw-text download URL for a book id
///
/// The endpoint lives at the site root regardless of the catalog path.
pub fn text_download_url(catalog_url: &Url, id: u32) -> Result<Url, url::ParseError> {
    catalog_url.join(&format!("/txt.php?id={}", id))
}

/// Extracts the numeric book id from a detail page URL
///
/// Detail pages use `/b<id>/` paths; returns `None` when the URL does not
/// follow that shape.
pub fn book_id_from_url(url: &Url) -> Option<u32> {
    let segment = url.path_segments()?.rev().find(|s| !s.is_empty())?;
    segment.strip_prefix('b')?.parse().ok()
}

/// Derives a filename for a cover image from its URL
///
/// Uses the last path segment, which on the target site carries the
/// original image filename with its extension.
pub fn image_filename_from_url(url: &Url) -> Option<String> {
    let segment = url.path_segments()?.rev().find(|s| !s.is_empty())?;
    if segment.is_empty() {
        None
    } else {
        Some(segment.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Url {
        Url::parse("https://tululu.org/l55/").unwrap()
    }

    #[test]
    fn test_listing_page_url() {
        let url = listing_page_url(&catalog(), 3).unwrap();
        assert_eq!(url.as_str(), "https://tululu.org/l55/3");
    }

    #[test]
    fn test_text_download_url() {
        let url = text_download_url(&catalog(), 42).unwrap();
        assert_eq!(url.as_str(), "https://tululu.org/txt.php?id=42");
    }

    #[test]
    fn test_book_id_from_detail_url() {
        let url = Url::parse("https://tululu.org/b239/").unwrap();
        assert_eq!(book_id_from_url(&url), Some(239));
    }

    #[test]
    fn test_book_id_without_trailing_slash() {
        let url = Url::parse("https://tululu.org/b7").unwrap();
        assert_eq!(book_id_from_url(&url), Some(7));
    }

    #[test]
    fn test_book_id_rejects_non_book_path() {
        let url = Url::parse("https://tululu.org/l55/2").unwrap();
        assert_eq!(book_id_from_url(&url), None);
    }

    #[test]
    fn test_image_filename_from_url() {
        let url = Url::parse("https://tululu.org/shots/239.jpg").unwrap();
        assert_eq!(image_filename_from_url(&url), Some("239.jpg".to_string()));
    }

    #[test]
    fn test_image_filename_missing_segment() {
        let url = Url::parse("https://tululu.org/").unwrap();
        assert_eq!(image_filename_from_url(&url), None);
    }
}

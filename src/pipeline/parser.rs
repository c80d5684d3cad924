//! Detail page parser
//!
//! Extracts a [`BookRecord`] from a book detail page. Pure function, no
//! I/O: the orchestrator hands in the already-fetched body.
//!
//! The markup is loosely structured: title and author share a single
//! heading separated by `::`, the cover image sits inside a
//! `div.bookimage` container, genres are anchors inside `span.d_book`,
//! and comments are `span.black` nodes inside `div.texts` blocks.

use crate::config::NormalizationPolicy;
use crate::ScrapeError;
use scraper::{Html, Selector};
use serde::Serialize;
use url::Url;

/// Metadata extracted from one book detail page
///
/// `img_src` starts as the remote cover URL; the orchestrator overwrites
/// it with the local path after a successful download. `book_path` is set
/// only when the text download succeeded, so consumers can detect partial
/// failure per asset.
#[derive(Debug, Clone, Serialize)]
pub struct BookRecord {
    /// Book title
    pub title: String,

    /// Author name
    pub author: String,

    /// Cover image: remote URL, or local path after download
    pub img_src: String,

    /// Reader comment texts, in document order
    pub comments: Vec<String>,

    /// Genre labels, in document order
    pub genres: Vec<String>,

    /// Local path of the downloaded text file, if the download succeeded
    pub book_path: Option<String>,
}

/// Parses a book detail page into a [`BookRecord`]
///
/// # Hard failures
///
/// A missing title heading or missing cover image element makes the
/// record unproducible; the book must be skipped, never defaulted. Empty
/// genre or comment lists are normal.
///
/// The cover image URL is resolved against the **detail page** URL, not
/// the listing page.
pub fn parse_detail_page(
    book_url: &Url,
    html: &str,
    normalization: NormalizationPolicy,
) -> Result<BookRecord, ScrapeError> {
    let document = Html::parse_document(html);

    let (title, author) = extract_title_author(&document, normalization)
        .ok_or_else(|| parse_error(book_url, "missing title heading"))?;

    let img_src = extract_cover_url(&document, book_url)
        .ok_or_else(|| parse_error(book_url, "missing cover image"))?;

    Ok(BookRecord {
        title,
        author,
        img_src: img_src.to_string(),
        comments: extract_texts(&document, "div.texts span.black"),
        genres: extract_texts(&document, "span.d_book a"),
        book_path: None,
    })
}

fn parse_error(url: &Url, message: &str) -> ScrapeError {
    ScrapeError::Parse {
        url: url.to_string(),
        message: message.to_string(),
    }
}

/// Extracts title and author from the shared `h1` heading
///
/// The heading reads `Title :: Author`. A heading without the delimiter
/// yields the whole text as title and an empty author.
fn extract_title_author(
    document: &Html,
    normalization: NormalizationPolicy,
) -> Option<(String, String)> {
    let selector = Selector::parse("h1").ok()?;
    let heading = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();

    let (title_raw, author_raw) = match heading.split_once("::") {
        Some((t, a)) => (t, a),
        None => (heading.as_str(), ""),
    };

    let title = clean_heading_part(title_raw);
    let author = clean_heading_part(author_raw);
    if title.is_empty() && author.is_empty() {
        return None;
    }

    Some(match normalization {
        NormalizationPolicy::Raw => (title, author),
        NormalizationPolicy::Normalized => (capitalize_first(&title), title_case(&author)),
    })
}

/// Extracts the cover image URL, resolved against the detail page URL
fn extract_cover_url(document: &Html, book_url: &Url) -> Option<Url> {
    let selector = Selector::parse("div.bookimage img[src]").ok()?;
    let src = document.select(&selector).next()?.value().attr("src")?;
    book_url.join(src.trim()).ok()
}

/// Collects the trimmed text of every element matching `selector_str`,
/// in document order
fn extract_texts(document: &Html, selector_str: &str) -> Vec<String> {
    let Ok(selector) = Selector::parse(selector_str) else {
        return Vec::new();
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

/// Strips whitespace and stray `:` punctuation left over from the
/// heading delimiter
fn clean_heading_part(part: &str) -> String {
    part.trim().trim_matches(':').trim().to_string()
}

/// Uppercases the first letter and lowercases the rest
fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}

/// Title-cases each whitespace-separated word
fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(capitalize_first)
        .collect::<Vec<_>>()
        .join(" ")
}

//! Catalog walker
//!
//! Iterates listing pages in a numeric range, extracts book detail-page
//! links from each page, and stops as soon as a page resolves to the
//! site's redirect-as-not-found signal (pagination exhaustion).

use crate::config::RunConfig;
use crate::pipeline::fetcher::{Fetcher, TextOutcome};
use crate::site;
use crate::ScrapeError;
use scraper::{Html, Selector};
use url::Url;

/// A discovered book: its numeric id and canonical detail-page URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookReference {
    /// Numeric book id, taken from the `/b<id>/` detail path
    pub id: u32,

    /// Absolute detail-page URL
    pub url: Url,
}

/// Result of walking the catalog
///
/// A listing page that fails with an HTTP error (or exhausts retries)
/// aborts discovery, but references gathered from earlier pages are kept
/// so the caller can still process them.
#[derive(Debug)]
pub struct WalkOutcome {
    /// Discovered references, in page order then within-page order
    pub references: Vec<BookReference>,

    /// The failure that cut the walk short, if any
    pub aborted: Option<ScrapeError>,
}

/// Walks listing pages from `start_page` until `end_page` (exclusive),
/// the not-found signal, or a listing failure
///
/// Pages past a not-found listing page are never fetched. The whole range
/// is materialized before any downloads begin.
pub async fn walk(fetcher: &Fetcher, config: &RunConfig) -> Result<WalkOutcome, ScrapeError> {
    let mut references = Vec::new();
    let mut page = config.start_page;

    while config.end_page.map_or(true, |end| page < end) {
        let page_url = site::listing_page_url(&config.catalog_url, page)?;
        tracing::debug!("Fetching listing page {}: {}", page, page_url);

        let body = match fetcher.fetch_text(&page_url).await {
            Ok(TextOutcome::Success { body, .. }) => body,
            Ok(TextOutcome::NotFound) => {
                tracing::info!("Listing page {} does not exist, stopping walk", page);
                break;
            }
            Ok(TextOutcome::HttpError { status }) => {
                tracing::error!("Listing page {} failed with HTTP {}", page, status);
                return Ok(WalkOutcome {
                    references,
                    aborted: Some(ScrapeError::ListingPage { page, status }),
                });
            }
            Err(e) => {
                tracing::error!("Listing page {} unreachable: {}", page, e);
                return Ok(WalkOutcome {
                    references,
                    aborted: Some(e),
                });
            }
        };

        let links = extract_book_links(&body, &page_url);
        tracing::info!("Page {}: {} book links", page, links.len());

        for url in links {
            match site::book_id_from_url(&url) {
                Some(id) => references.push(BookReference { id, url }),
                None => tracing::debug!("Skipping non-book link {}", url),
            }
        }

        page += 1;
    }

    Ok(WalkOutcome {
        references,
        aborted: None,
    })
}

/// Extracts book detail-page URLs from a listing page body
///
/// Each book card is a `table.d_book`; the first anchor inside the card
/// links to the detail page. Links are resolved absolute against the
/// listing page URL and returned in document order.
pub fn extract_book_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);

    let (Ok(card_selector), Ok(anchor_selector)) =
        (Selector::parse("table.d_book"), Selector::parse("a[href]"))
    else {
        return Vec::new();
    };

    let mut links = Vec::new();
    for card in document.select(&card_selector) {
        let Some(anchor) = card.select(&anchor_selector).next() else {
            continue;
        };
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        match page_url.join(href.trim()) {
            Ok(url) => links.push(url),
            Err(e) => tracing::debug!("Failed to resolve card link '{}': {}", href, e),
        }
    }

    links
}

use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Casing policy applied to parsed title and author fields
///
/// The source catalog is inconsistent about casing, so normalization is an
/// explicit, configurable step rather than a baked-in behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum NormalizationPolicy {
    /// Preserve the casing exactly as it appears in the page markup
    Raw,

    /// Capitalize the first letter of the title; title-case each word of
    /// the author name
    Normalized,
}

/// Immutable configuration for one scrape run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// First catalog page to walk (1-based)
    pub start_page: u32,

    /// Exclusive upper page bound; `None` walks until the catalog runs out
    pub end_page: Option<u32>,

    /// Base URL of the paginated catalog listing
    pub catalog_url: Url,

    /// Root folder for downloaded assets (`books/` and `images/` subfolders)
    pub dest_dir: PathBuf,

    /// Path of the output JSON metadata file
    pub output_path: PathBuf,

    /// Skip downloading book text files
    pub skip_text: bool,

    /// Skip downloading cover images
    pub skip_images: bool,

    /// Maximum fetch attempts per URL (including the initial attempt)
    pub max_attempts: u32,

    /// Fixed pause between attempts after a connection failure
    pub retry_delay: Duration,

    /// Casing policy for parsed title/author fields
    pub normalization: NormalizationPolicy,
}

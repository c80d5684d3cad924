//! Bookshelf-Scraper main entry point
//!
//! Command-line interface for the book catalog scraper.

use bookshelf_scraper::config::{NormalizationPolicy, RunConfig};
use bookshelf_scraper::output::print_summary;
use bookshelf_scraper::pipeline::scrape;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Bookshelf-Scraper: a book catalog scraper
///
/// Walks a paginated book catalog, downloads each book's text and cover
/// image, and writes the collected metadata to a single JSON file.
#[derive(Parser, Debug)]
#[command(name = "bookshelf-scraper")]
#[command(version = "1.0.0")]
#[command(about = "A book catalog scraper", long_about = None)]
struct Cli {
    /// First catalog page to walk
    #[arg(long, default_value_t = 1)]
    start_page: u32,

    /// Exclusive upper page bound (walks until the catalog ends if omitted)
    #[arg(long)]
    end_page: Option<u32>,

    /// Base URL of the paginated catalog listing
    #[arg(long, default_value = "https://tululu.org/l55/")]
    catalog_url: Url,

    /// Root folder for downloaded books and images
    #[arg(long, default_value = "download")]
    dest: PathBuf,

    /// Path of the output metadata JSON file
    #[arg(long, default_value = "books.json")]
    output: PathBuf,

    /// Do not download book text files
    #[arg(long)]
    skip_txt: bool,

    /// Do not download cover images
    #[arg(long)]
    skip_imgs: bool,

    /// Maximum fetch attempts per URL on connection failures
    #[arg(long, default_value_t = 5)]
    max_attempts: u32,

    /// Seconds to wait between attempts after a connection failure
    #[arg(long, default_value_t = 10)]
    retry_delay: u64,

    /// Casing applied to parsed title/author fields
    #[arg(long, value_enum, default_value = "normalized")]
    casing: NormalizationPolicy,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate configuration and show what would be scraped, without
    /// touching the network
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let config = RunConfig {
        start_page: cli.start_page,
        end_page: cli.end_page,
        catalog_url: cli.catalog_url,
        dest_dir: cli.dest,
        output_path: cli.output,
        skip_text: cli.skip_txt,
        skip_images: cli.skip_imgs,
        max_attempts: cli.max_attempts,
        retry_delay: Duration::from_secs(cli.retry_delay),
        normalization: cli.casing,
    };

    bookshelf_scraper::config::validate(&config)?;

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    tracing::info!(
        "Scraping {} from page {}{}",
        config.catalog_url,
        config.start_page,
        match config.end_page {
            Some(end) => format!(" to page {} (exclusive)", end),
            None => " until the catalog ends".to_string(),
        }
    );

    let summary = scrape(config).await?;
    print_summary(&summary);

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("bookshelf_scraper=info,warn"),
            1 => EnvFilter::new("bookshelf_scraper=debug,info"),
            2 => EnvFilter::new("bookshelf_scraper=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: validates config and shows the plan
fn handle_dry_run(config: &RunConfig) {
    println!("=== Bookshelf-Scraper Dry Run ===\n");

    println!("Catalog:");
    println!("  URL: {}", config.catalog_url);
    println!("  Start page: {}", config.start_page);
    match config.end_page {
        Some(end) => println!("  End page: {} (exclusive)", end),
        None => println!("  End page: open-ended"),
    }

    println!("\nDownloads:");
    println!("  Destination: {}", config.dest_dir.display());
    println!("  Book texts: {}", if config.skip_text { "skipped" } else { "enabled" });
    println!("  Cover images: {}", if config.skip_images { "skipped" } else { "enabled" });

    println!("\nOutput:");
    println!("  Metadata file: {}", config.output_path.display());
    println!("  Casing policy: {:?}", config.normalization);

    println!("\nRetry:");
    println!("  Max attempts: {}", config.max_attempts);
    println!("  Backoff: {:?}", config.retry_delay);

    println!("\n✓ Configuration is valid");
}

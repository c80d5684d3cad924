//! Configuration module for Bookshelf-Scraper
//!
//! A run is configured entirely from CLI flags; this module holds the
//! resulting [`RunConfig`] and its validation rules.

mod types;
mod validation;

pub use types::{NormalizationPolicy, RunConfig};
pub use validation::validate;

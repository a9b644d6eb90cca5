//! Crawler module for page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching of pages and downloadable files
//! - Link classification into page and file targets
//! - Title and main-text extraction
//! - Traversal coordination with depth bounds and rate pacing

mod classifier;
mod coordinator;
mod extractor;
mod fetcher;
mod files;

pub use classifier::{classify, LinkSets};
pub use coordinator::{CrawlSession, CrawlStats};
pub use extractor::{extract_main_text, extract_title, MAIN_TEXT_CAP, UNTITLED};
pub use fetcher::{build_http_client, fetch_page, PageFetch};
pub use files::{fetch_file, CSV_LINE_CAP, FILE_TEXT_CAP};

use crate::config::Config;
use crate::output::CsvSink;
use crate::summarize::Summarizer;
use crate::SitebriefError;
use std::path::Path;

/// Runs a complete crawl
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Re-create the CSV sink with a header row
/// 2. Build the HTTP client and summarizer
/// 3. Traverse pages from the seed up to the configured depth bounds
/// 4. Append one record per successfully visited page
///
/// # Arguments
///
/// * `config` - The crawler configuration
///
/// # Returns
///
/// * `Ok(CrawlStats)` - Crawl completed; counters for the run
/// * `Err(SitebriefError)` - Initialization failed (the traversal itself
///   degrades node-by-node and never aborts the run)
pub async fn crawl(config: Config) -> Result<CrawlStats, SitebriefError> {
    let sink = CsvSink::create(Path::new(&config.output.csv_path))?;
    let client = build_http_client(&config.http)?;
    let summarizer = Summarizer::from_config(&config.summarizer);

    let mut session = CrawlSession::new(config, client, summarizer, sink)?;
    Ok(session.run().await)
}

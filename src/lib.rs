//! Sitebrief: a bounded-depth site crawler with per-page summarization
//!
//! This crate implements a crawler that visits pages reachable from a seed
//! URL, extracts page text and linked downloadable files, asks an external
//! chat-completion service for a cleaned-up summary, and appends one CSV
//! record per visited page.

pub mod config;
pub mod crawler;
pub mod output;
pub mod summarize;
pub mod url;

use thiserror::Error;

/// Main error type for Sitebrief operations
#[derive(Debug, Error)]
pub enum SitebriefError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Sink error: {0}")]
    Sink(#[from] output::SinkError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Sitebrief operations
pub type Result<T> = std::result::Result<T, SitebriefError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{crawl, CrawlStats};
pub use output::{CsvSink, PageRecord, RecordSink};
pub use summarize::Summarizer;

//! Sitebrief main entry point
//!
//! Command-line interface for the Sitebrief crawler.

use anyhow::Context;
use clap::Parser;
use sitebrief::config::load_config_with_hash;
use sitebrief::crawler::crawl;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Sitebrief: crawl a site and summarize every page into a CSV
///
/// Sitebrief visits pages reachable from a seed URL up to a configured
/// depth, downloads linked text/CSV/PDF files, asks a chat-completion
/// service for a cleaned-up summary of each page, and appends one
/// (URL, Title, Summary) row per visited page.
#[derive(Parser, Debug)]
#[command(name = "sitebrief")]
#[command(version)]
#[command(about = "Bounded-depth site crawler with per-page summarization", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded successfully (hash: {})", config_hash);

    if cli.dry_run {
        print_dry_run(&config);
        return Ok(());
    }

    tracing::info!("Crawler starting");
    let stats = crawl(config).await.context("crawl failed to initialize")?;
    tracing::info!("Crawler finished");

    println!(
        "Crawl complete: {} pages visited, {} records written, {} files ingested, {} fetch failures, {} skipped",
        stats.pages_visited,
        stats.records_written,
        stats.files_fetched,
        stats.fetch_failures,
        stats.pages_skipped
    );

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitebrief=info,warn"),
            1 => EnvFilter::new("sitebrief=debug,info"),
            2 => EnvFilter::new("sitebrief=trace,debug"),
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

/// Prints the --dry-run report: validated config and crawl plan
fn print_dry_run(config: &sitebrief::Config) {
    println!("=== Sitebrief Dry Run ===\n");

    println!("Crawl:");
    println!("  Seed URL: {}", config.crawl.seed_url);
    println!("  Max depth: {}", config.crawl.max_depth);
    println!("  Link-follow depth: {}", config.crawl.link_follow_depth);
    println!("  Request delay: {}ms", config.crawl.request_delay_ms);
    println!("  File extensions: {}", config.crawl.file_extensions.join(", "));

    println!("\nHTTP:");
    println!("  User agent: {}", config.http.user_agent);
    println!("  Timeout: {}s", config.http.timeout_secs);

    println!("\nSummarizer:");
    println!("  Model: {}", config.summarizer.model);
    println!("  API base: {}", config.summarizer.api_base);
    let key_source = if config.summarizer.api_key.is_some() {
        "config".to_string()
    } else {
        format!("env:{}", config.summarizer.api_key_env)
    };
    println!("  API key source: {}", key_source);

    println!("\nOutput:");
    println!("  CSV path: {}", config.output.csv_path);

    println!("\n✓ Configuration is valid");
}

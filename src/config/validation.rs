use crate::config::types::Config;
use crate::ConfigError;
use url::Url;

/// Validates a parsed configuration
///
/// Checks performed:
/// - the seed URL parses, uses http or https, and has a host
/// - the file extension list entries start with a dot
/// - the output path is not empty
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    let seed = Url::parse(&config.crawl.seed_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("{}: {}", config.crawl.seed_url, e)))?;

    if seed.scheme() != "http" && seed.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url must use http or https, got: {}",
            seed.scheme()
        )));
    }

    if seed.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "seed-url has no host: {}",
            config.crawl.seed_url
        )));
    }

    for ext in &config.crawl.file_extensions {
        if !ext.starts_with('.') || ext.len() < 2 {
            return Err(ConfigError::Validation(format!(
                "file extension must start with a dot: {:?}",
                ext
            )));
        }
    }

    if config.output.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "output csv-path must not be empty".to_string(),
        ));
    }

    if config.http.timeout_secs == 0 {
        return Err(ConfigError::Validation(
            "http timeout-secs must be greater than zero".to_string(),
        ));
    }

    // The two depth knobs are independent by design; just flag the unusual case.
    if config.crawl.link_follow_depth > config.crawl.max_depth {
        tracing::warn!(
            "link-follow-depth ({}) exceeds max-depth ({}); max-depth governs",
            config.crawl.link_follow_depth,
            config.crawl.max_depth
        );
    }

    Ok(())
}

//! HTTP fetcher for page requests
//!
//! Builds the shared HTTP client and performs single-shot page fetches.
//! There is no retry policy: every failure is immediately downgraded to a
//! terminal outcome for that node.

use crate::config::HttpConfig;
use reqwest::Client;
use std::time::Duration;

/// Result of a page fetch
#[derive(Debug)]
pub enum PageFetch {
    /// Successfully fetched the page body
    Success {
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpStatus {
        /// The HTTP status code
        status: u16,
    },

    /// Network-level failure (connect, timeout, body read)
    Transport {
        /// Error description
        error: String,
    },
}

/// Builds the HTTP client shared by page and file fetches
///
/// The client carries the configured user agent and per-request timeout.
/// Gzip and brotli are negotiated transparently.
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a page and classifies the outcome
///
/// Logs each outcome the same way regardless of caller: success at info,
/// unexpected status at warn, transport errors at error. Never panics and
/// never retries.
pub async fn fetch_page(client: &Client, url: &str) -> PageFetch {
    match client.get(url).send().await {
        Ok(response) => {
            let status = response.status();
            if !status.is_success() {
                tracing::warn!("Unexpected status code {} for {}", status.as_u16(), url);
                return PageFetch::HttpStatus {
                    status: status.as_u16(),
                };
            }

            match response.text().await {
                Ok(body) => {
                    tracing::info!("Fetched page content: {}", url);
                    PageFetch::Success { body }
                }
                Err(e) => {
                    tracing::error!("Failed to read body of {}: {}", url, e);
                    PageFetch::Transport {
                        error: e.to_string(),
                    }
                }
            }
        }
        Err(e) => {
            let error = if e.is_timeout() {
                "request timeout".to_string()
            } else if e.is_connect() {
                "connection failed".to_string()
            } else {
                e.to_string()
            };
            tracing::error!("Request error for {}: {}", url, error);
            PageFetch::Transport { error }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HttpConfig;

    #[test]
    fn test_build_http_client() {
        let config = HttpConfig {
            user_agent: "TestBot/1.0".to_string(),
            timeout_secs: 5,
        };
        assert!(build_http_client(&config).is_ok());
    }

    #[test]
    fn test_build_http_client_defaults() {
        assert!(build_http_client(&HttpConfig::default()).is_ok());
    }
}

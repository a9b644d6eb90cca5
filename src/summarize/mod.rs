//! Summarizer adapter for an OpenAI-compatible chat-completions API
//!
//! Turns the extracted page text plus downloaded file texts into one prompt
//! and asks the external service for a cleaned, structured summary. The
//! public surface is infallible: every failure collapses into a sentinel
//! string so the record schema is always satisfied.

use crate::config::SummarizerConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

/// Sentinel summary when there is nothing to summarize
pub const NO_CONTENT_SUMMARY: &str = "Нет данных для суммаризации";

/// Sentinel summary when the external service fails
pub const SUMMARY_FAILED: &str = "Ошибка суммаризации";

/// Number of leading characters of each file text embedded in the prompt
const FILE_SNIPPET_CAP: usize = 500;

/// Errors internal to the summarization call
#[derive(Debug, Error)]
pub enum SummarizeError {
    /// Missing API key or unusable settings
    #[error("Configuration error: {0}")]
    Config(String),

    /// Connection failed or request timed out
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response from the service
    #[error("API error: {0}")]
    Api(String),

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Chat message
#[derive(Debug, Clone, Serialize)]
struct Message {
    role: String,
    content: String,
}

impl Message {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Chat completion request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

/// Raw chat response (for internal parsing)
#[derive(Debug, Deserialize)]
struct ChatResponseRaw {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: String,
}

/// Minimal client for the chat-completions endpoint
#[derive(Debug, Clone)]
struct ChatClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl ChatClient {
    fn new(api_key: String, base_url: String, timeout: Duration) -> Result<Self, SummarizeError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SummarizeError::Config(e.to_string()))?;
        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }

    async fn chat_completion(&self, request: &ChatRequest) -> Result<String, SummarizeError> {
        let url = format!("{}/chat/completions", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SummarizeError::Network("request timeout".to_string())
                } else {
                    SummarizeError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizeError::Api(format!("{}: {}", status.as_u16(), body)));
        }

        let raw: ChatResponseRaw = response
            .json()
            .await
            .map_err(|e| SummarizeError::Parse(e.to_string()))?;

        raw.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| SummarizeError::Parse("response contained no choices".to_string()))
    }
}

/// Summarizer adapter owned by the crawl session
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: Option<ChatClient>,
    model: String,
    system_prompt: String,
}

impl Summarizer {
    /// Builds a summarizer from configuration
    ///
    /// The API key comes from `api-key` or, when unset, the `api-key-env`
    /// environment variable. A missing key is not fatal at startup: every
    /// summarization call will degrade to [`SUMMARY_FAILED`] instead.
    pub fn from_config(config: &SummarizerConfig) -> Self {
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var(&config.api_key_env).ok());

        let client = match api_key {
            Some(key) => {
                ChatClient::new(key, config.api_base.clone(), Duration::from_secs(config.timeout_secs))
                    .map_err(|e| tracing::error!("Failed to build summarization client: {}", e))
                    .ok()
            }
            None => {
                tracing::warn!(
                    "No API key found (api-key unset, {} not in environment); summaries will be unavailable",
                    config.api_key_env
                );
                None
            }
        };

        Self {
            client,
            model: config.model.clone(),
            system_prompt: config.system_prompt.clone(),
        }
    }

    /// Summarizes page text plus downloaded file texts
    ///
    /// Returns [`NO_CONTENT_SUMMARY`] without calling the service when both
    /// inputs are empty, and [`SUMMARY_FAILED`] on any service failure. Never
    /// propagates an error to the caller.
    pub async fn summarize(&self, page_text: &str, files: &BTreeMap<String, String>) -> String {
        if page_text.trim().is_empty() && files.is_empty() {
            tracing::warn!("Skipping summarization: no input text");
            return NO_CONTENT_SUMMARY.to_string();
        }

        let prompt = build_prompt(page_text, files);

        let Some(client) = &self.client else {
            tracing::error!("Summarization failed: client not configured");
            return SUMMARY_FAILED.to_string();
        };

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(self.system_prompt.clone()),
                Message::user(prompt),
            ],
        };

        match client.chat_completion(&request).await {
            Ok(summary) => {
                tracing::info!("Summarization succeeded");
                summary
            }
            Err(e) => {
                tracing::error!("Summarization failed: {}", e);
                SUMMARY_FAILED.to_string()
            }
        }
    }
}

/// Builds the single user prompt from page text and file snippets
///
/// Each file contributes its URL and the first [`FILE_SNIPPET_CAP`]
/// characters of its text.
fn build_prompt(page_text: &str, files: &BTreeMap<String, String>) -> String {
    let mut prompt = String::from(page_text);

    for (url, text) in files {
        let snippet: String = text.chars().take(FILE_SNIPPET_CAP).collect();
        prompt.push_str("\n\nФайл ");
        prompt.push_str(url);
        prompt.push_str(":\n");
        prompt.push_str(&snippet);
    }

    prompt
}

use serde::Deserialize;

/// Main configuration structure for Sitebrief
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawl: CrawlConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub summarizer: SummarizerConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Crawl traversal configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlConfig {
    /// Seed URL to start crawling from; its scheme+host is the crawl boundary
    #[serde(rename = "seed-url")]
    pub seed_url: String,

    /// Maximum depth at which a page is still processed and recorded
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Depth below which links discovered on a page are still followed
    #[serde(rename = "link-follow-depth", default = "default_link_follow_depth")]
    pub link_follow_depth: u32,

    /// Minimum time between successive requests (milliseconds)
    #[serde(rename = "request-delay-ms", default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    /// Extensions that classify a link as a downloadable file
    #[serde(rename = "file-extensions", default = "default_file_extensions")]
    pub file_extensions: Vec<String>,
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout for page and file fetches (seconds)
    #[serde(rename = "timeout-secs", default = "default_http_timeout_secs")]
    pub timeout_secs: u64,
}

/// Summarization service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SummarizerConfig {
    /// Model identifier passed to the chat-completions endpoint
    #[serde(default = "default_model")]
    pub model: String,

    /// System instruction sent with every summarization request
    #[serde(rename = "system-prompt", default = "default_system_prompt")]
    pub system_prompt: String,

    /// Base URL of the OpenAI-compatible API
    #[serde(rename = "api-base", default = "default_api_base")]
    pub api_base: String,

    /// API key set directly in the config; takes precedence over api-key-env
    #[serde(rename = "api-key", default)]
    pub api_key: Option<String>,

    /// Environment variable to read the API key from when api-key is unset
    #[serde(rename = "api-key-env", default = "default_api_key_env")]
    pub api_key_env: String,

    /// Timeout for the summarization call (seconds)
    #[serde(rename = "timeout-secs", default = "default_summarizer_timeout_secs")]
    pub timeout_secs: u64,
}

/// Output sink configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV results file, re-created empty at the start of a run
    #[serde(rename = "csv-path", default = "default_csv_path")]
    pub csv_path: String,
}

fn default_max_depth() -> u32 {
    3
}

fn default_link_follow_depth() -> u32 {
    2
}

fn default_request_delay_ms() -> u64 {
    1000
}

fn default_file_extensions() -> Vec<String> {
    vec![".txt".to_string(), ".csv".to_string(), ".pdf".to_string()]
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_http_timeout_secs() -> u64 {
    10
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_system_prompt() -> String {
    "Тебе будет передан весь текст с сайта. Твоя задача - очистить текст от мусора \
     (тех. информация, повторы и т.д.), структурировать и выдать ответ в формате текста."
        .to_string()
}

fn default_api_base() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_summarizer_timeout_secs() -> u64 {
    60
}

fn default_csv_path() -> String {
    "results.csv".to_string()
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl Default for SummarizerConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            system_prompt: default_system_prompt(),
            api_base: default_api_base(),
            api_key: None,
            api_key_env: default_api_key_env(),
            timeout_secs: default_summarizer_timeout_secs(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            csv_path: default_csv_path(),
        }
    }
}

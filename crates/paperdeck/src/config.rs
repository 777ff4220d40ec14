//! Configuration for the paperdeck backend.

use std::time::Duration;

/// Upstream endpoint constants.
pub mod endpoints {
    use std::time::Duration;

    /// Default base URL of the document-analysis backend.
    ///
    /// The backend is a separately maintained service expected to implement
    /// `/upload_pdf`, `/upload_pdf_get_sum_graph`, `/semantic_parts`,
    /// `/chatbot` and `/clear_history`.
    pub const ANALYSIS_BASE_URL: &str = "http://127.0.0.1:8000";

    /// Default URL of the literature-search API (OpenAlex/Semantic Scholar
    /// aggregator, `POST {query}` -> `{papers, hasMore}`).
    pub const SEARCH_API_URL: &str = "http://127.0.0.1:8001/api/search";

    /// Browser user-agent sent when fetching PDFs directly. Some publisher
    /// servers reject non-browser clients outright.
    pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
         AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(90);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Attempts per forwarded upload (first try included).
    pub const UPLOAD_RETRY_ATTEMPTS: u32 = 3;

    /// Fixed delay between forwarded-upload attempts.
    pub const UPLOAD_RETRY_DELAY: Duration = Duration::from_millis(1000);

    /// Search response cache TTL (5 minutes).
    pub const CACHE_TTL: Duration = Duration::from_secs(300);

    /// Maximum search cache size.
    pub const CACHE_MAX_SIZE: u64 = 1000;

    /// Maximum keepalive connections.
    pub const MAX_KEEPALIVE: usize = 10;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);

    /// Characters of the paper title kept in the forwarded upload filename.
    pub const UPLOAD_TITLE_CHARS: usize = 50;

    /// Maximum accepted PDF upload size (50 MiB). Research papers with
    /// embedded figures routinely exceed axum's 2 MB default body limit.
    pub const MAX_UPLOAD_BYTES: usize = 50 * 1024 * 1024;
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the document-analysis backend.
    pub analysis_base_url: String,

    /// URL of the literature-search API.
    pub search_api_url: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Search cache TTL.
    pub cache_ttl: Duration,

    /// Maximum search cache size.
    pub cache_max_size: u64,
}

impl Config {
    /// Create a new configuration, falling back to default endpoints for
    /// anything not supplied.
    #[must_use]
    pub fn new(analysis_base_url: Option<String>, search_api_url: Option<String>) -> Self {
        Self {
            analysis_base_url: analysis_base_url
                .unwrap_or_else(|| endpoints::ANALYSIS_BASE_URL.to_string()),
            search_api_url: search_api_url.unwrap_or_else(|| endpoints::SEARCH_API_URL.to_string()),
            request_timeout: endpoints::REQUEST_TIMEOUT,
            connect_timeout: endpoints::CONNECT_TIMEOUT,
            cache_ttl: endpoints::CACHE_TTL,
            cache_max_size: endpoints::CACHE_MAX_SIZE,
        }
    }

    /// Create a test configuration pointing both upstreams at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            analysis_base_url: base_url.to_string(),
            search_api_url: format!("{}/search", base_url),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            cache_ttl: Duration::from_secs(0), // No caching in tests
            cache_max_size: 0,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let analysis = std::env::var("ANALYSIS_API_URL").ok();
        let search = std::env::var("SEARCH_API_URL").ok();
        Ok(Self::new(analysis, search))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, None)
    }
}

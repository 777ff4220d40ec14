//! Literature-search API client.
//!
//! Posts `{query}` to the configured search API and parses the
//! `{papers, hasMore}` envelope. Carries:
//! - Connection pooling via reqwest
//! - Retry middleware with exponential backoff
//! - Response caching with 5-minute TTL

use std::time::Duration;

use moka::future::Cache;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};

use crate::config::{Config, endpoints};
use crate::error::{ClientError, ClientResult};
use crate::models::SearchResponse;

/// Client for the literature-search API.
#[derive(Clone)]
pub struct SearchClient {
    /// HTTP client with middleware.
    client: ClientWithMiddleware,

    /// Response cache.
    cache: Cache<String, serde_json::Value>,

    /// Search API URL.
    search_api_url: String,
}

impl SearchClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(endpoints::MAX_KEEPALIVE)
            .pool_idle_timeout(endpoints::KEEPALIVE_EXPIRY)
            .gzip(true)
            .build()?;

        let retry_policy = ExponentialBackoff::builder()
            .retry_bounds(Duration::from_secs(1), Duration::from_secs(30))
            .build_with_max_retries(3);

        let client = ClientBuilder::new(client)
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        let cache =
            Cache::builder().max_capacity(config.cache_max_size).time_to_live(config.cache_ttl).build();

        Ok(Self { client, cache, search_api_url: config.search_api_url.clone() })
    }

    /// Search the literature for one query string.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx response, or an
    /// unparseable body.
    pub async fn search(&self, query: &str) -> ClientResult<SearchResponse> {
        let cache_key = self.cache_key(query);
        if let Some(cached) = self.cache.get(&cache_key).await {
            return serde_json::from_value(cached).map_err(ClientError::from);
        }

        let body = serde_json::json!({ "query": query });

        let response = self.client.post(&self.search_api_url).json(&body).send().await?;
        let response = super::handle_status(response).await?;
        let value: serde_json::Value = response.json().await?;

        self.cache.insert(cache_key, value.clone()).await;

        serde_json::from_value(value).map_err(ClientError::from)
    }

    /// Generate cache key.
    fn cache_key(&self, query: &str) -> String {
        use md5::{Digest, Md5};

        let mut hasher = Md5::new();
        hasher.update(self.search_api_url.as_bytes());
        hasher.update(b"|");
        hasher.update(query.as_bytes());

        format!("{:x}", hasher.finalize())
    }
}

impl std::fmt::Debug for SearchClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchClient").field("search_api_url", &self.search_api_url).finish()
    }
}

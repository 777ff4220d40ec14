//! PDF fetch client.
//!
//! Fetches PDF bytes with a browser user-agent. Publisher servers that block
//! non-browser clients accept these requests; the body is treated as an
//! opaque binary payload.

use reqwest::Client;

use crate::config::{Config, endpoints};
use crate::error::ClientResult;

/// Client for fetching PDF bytes from arbitrary publisher URLs.
#[derive(Clone)]
pub struct PdfProxyClient {
    client: Client,
}

impl PdfProxyClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(endpoints::BROWSER_USER_AGENT)
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { client })
    }

    /// Fetch the raw bytes behind a PDF URL.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx response.
    pub async fn fetch(&self, url: &str) -> ClientResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        let response = super::handle_status(response).await?;
        Ok(response.bytes().await?.to_vec())
    }
}

impl std::fmt::Debug for PdfProxyClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfProxyClient").finish()
    }
}

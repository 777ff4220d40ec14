//! Document-analysis backend client.
//!
//! The backend is a separately maintained service reached at a configured
//! base URL. File forwards go through the retrying forwarder; JSON endpoints
//! are passed through without retry.

use reqwest::Client;
use reqwest::multipart;

use super::retry::{RetryPolicy, forward_with_retry};
use crate::config::Config;
use crate::error::ClientResult;

/// Client for the document-analysis backend.
#[derive(Clone)]
pub struct AnalysisClient {
    client: Client,

    /// Backend base URL.
    base_url: String,

    /// Retry policy for forwarded uploads.
    retry: RetryPolicy,
}

impl AnalysisClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self { client, base_url: config.analysis_base_url.clone(), retry: RetryPolicy::upload() })
    }

    /// Override the retry policy (used by tests to shrink the delay).
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Forward a PDF to `/upload_pdf` for ingestion.
    ///
    /// # Errors
    ///
    /// Returns the last failure once the retry budget is exhausted, or the
    /// first non-retryable failure.
    pub async fn upload_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<serde_json::Value> {
        self.forward_pdf("/upload_pdf", file_name, bytes).await
    }

    /// Forward a PDF to `/upload_pdf_get_sum_graph` for analysis and
    /// summarization. The backend envelope
    /// `{status, message, data: {summary, visualization}}` is passed through.
    ///
    /// # Errors
    ///
    /// Returns the last failure once the retry budget is exhausted, or the
    /// first non-retryable failure.
    pub async fn summarize_pdf(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<serde_json::Value> {
        self.forward_pdf("/upload_pdf_get_sum_graph", file_name, bytes).await
    }

    /// POST to `/semantic_parts` and pass the backend response through.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx response.
    pub async fn semantic_parts(&self, body: serde_json::Value) -> ClientResult<serde_json::Value> {
        self.post_json("/semantic_parts", body).await
    }

    /// POST to `/chatbot` and pass the backend response through.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx response.
    pub async fn chat(&self, body: serde_json::Value) -> ClientResult<serde_json::Value> {
        self.post_json("/chatbot", body).await
    }

    /// POST to `/clear_history` and pass the backend response through.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure or non-2xx response.
    pub async fn clear_history(&self, body: serde_json::Value) -> ClientResult<serde_json::Value> {
        self.post_json("/clear_history", body).await
    }

    /// Multipart-forward a PDF under the `pdf` field, with retry. The form
    /// cannot be reused across attempts, so it is rebuilt per try.
    async fn forward_pdf(
        &self,
        path: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ClientResult<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);

        forward_with_retry(self.retry, || {
            let client = self.client.clone();
            let url = url.clone();
            let file_name = file_name.to_string();
            let bytes = bytes.clone();

            async move {
                let part = multipart::Part::bytes(bytes)
                    .file_name(file_name)
                    .mime_str("application/pdf")?;
                let form = multipart::Form::new().part("pdf", part);

                let response = client.post(&url).multipart(form).send().await?;
                let response = super::handle_status(response).await?;
                let value: serde_json::Value = response.json().await?;
                Ok(value)
            }
        })
        .await
    }

    async fn post_json(&self, path: &str, body: serde_json::Value) -> ClientResult<serde_json::Value> {
        let url = format!("{}{}", self.base_url, path);

        let response = self.client.post(&url).json(&body).send().await?;
        let response = super::handle_status(response).await?;
        let value: serde_json::Value = response.json().await?;
        Ok(value)
    }
}

impl std::fmt::Debug for AnalysisClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisClient").field("base_url", &self.base_url).finish()
    }
}

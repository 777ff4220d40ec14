//! HTTP clients for the external collaborators:
//!
//! - [`SearchClient`] — literature-search API, with response caching and
//!   transient-retry middleware
//! - [`AnalysisClient`] — document-analysis backend (uploads, semantic
//!   parsing, chat)
//! - [`PdfProxyClient`] — direct PDF fetches with a browser user-agent
//! - [`retry`] — the classified retrying forwarder used for upload forwards

mod analysis;
mod pdf_proxy;
pub mod retry;
mod search;

pub use analysis::AnalysisClient;
pub use pdf_proxy::PdfProxyClient;
pub use search::SearchClient;

use crate::error::{ClientError, ClientResult};

/// Map upstream response status codes onto the client error taxonomy.
pub(crate) async fn handle_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    match status.as_u16() {
        429 => {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
                .unwrap_or(60);

            Err(ClientError::rate_limited(retry_after))
        }
        404 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::not_found(text))
        }
        400 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::bad_request(text))
        }
        500..=599 => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::server(status.as_u16(), text))
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
        }
    }
}

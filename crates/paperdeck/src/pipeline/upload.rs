//! PDF upload batch.
//!
//! For each selected paper with a direct PDF URL: fetch the bytes, then
//! forward them to the analysis backend. Items fail independently; the
//! aggregate report keeps distinct success and failure counts.

use futures::future::join_all;

use crate::client::{AnalysisClient, PdfProxyClient};
use crate::error::ClientResult;
use crate::models::{Paper, UploadOutcome, UploadReport};

/// Upload every eligible paper concurrently.
///
/// Papers without a PDF URL are excluded entirely and never appear in the
/// report. Outcomes keep input order. One outcome per eligible paper,
/// success or error, independent of siblings.
pub async fn upload_batch(
    pdf_proxy: &PdfProxyClient,
    analysis: &AnalysisClient,
    papers: &[Paper],
) -> UploadReport {
    let eligible: Vec<&Paper> = papers.iter().filter(|p| p.is_eligible()).collect();

    let uploads = eligible.into_iter().map(|paper| async move {
        match upload_one(pdf_proxy, analysis, paper).await {
            Ok(()) => {
                tracing::info!(paper_id = %paper.paper_id, "paper uploaded");
                UploadOutcome::success(paper)
            }
            Err(e) => {
                tracing::warn!(paper_id = %paper.paper_id, error = %e, "paper upload failed");
                UploadOutcome::failure(paper, e.to_string())
            }
        }
    });

    let outcomes = join_all(uploads).await;
    let report = UploadReport::from_outcomes(outcomes);

    tracing::info!(succeeded = report.succeeded, failed = report.failed, "upload batch finished");
    report
}

/// Fetch one paper's PDF and forward it to the analysis backend.
async fn upload_one(
    pdf_proxy: &PdfProxyClient,
    analysis: &AnalysisClient,
    paper: &Paper,
) -> ClientResult<()> {
    // Eligibility is checked by the caller; an empty URL would 4xx upstream.
    let pdf_url = paper.pdf_url.as_deref().unwrap_or_default();

    let bytes = pdf_proxy.fetch(pdf_url).await?;
    analysis.upload_pdf(&paper.upload_filename(), bytes).await?;
    Ok(())
}

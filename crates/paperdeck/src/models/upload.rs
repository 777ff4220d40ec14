//! Upload batch outcome models.

use serde::{Deserialize, Serialize};

use super::Paper;

/// Success or failure of one paper's upload attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStatus {
    Success,
    Error,
}

/// Per-paper result of an upload batch. Produced once per eligible paper,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    /// Identifier of the uploaded paper.
    pub paper_id: String,

    /// Title of the uploaded paper.
    pub title: String,

    /// Whether the upload succeeded.
    pub status: UploadStatus,

    /// Failure message, for `error` outcomes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadOutcome {
    /// Record a successful upload.
    #[must_use]
    pub fn success(paper: &Paper) -> Self {
        Self {
            paper_id: paper.paper_id.clone(),
            title: paper.title_or_default().to_string(),
            status: UploadStatus::Success,
            error: None,
        }
    }

    /// Record a failed upload with its message.
    #[must_use]
    pub fn failure(paper: &Paper, message: impl Into<String>) -> Self {
        Self {
            paper_id: paper.paper_id.clone(),
            title: paper.title_or_default().to_string(),
            status: UploadStatus::Error,
            error: Some(message.into()),
        }
    }
}

/// Aggregate of an upload batch. Success and failure counts are reported
/// separately, not collapsed into one verdict.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadReport {
    /// Number of papers uploaded successfully.
    pub succeeded: usize,

    /// Number of papers that failed.
    pub failed: usize,

    /// Per-paper outcomes, in input order.
    pub outcomes: Vec<UploadOutcome>,
}

impl UploadReport {
    /// Aggregate a list of outcomes into a report.
    #[must_use]
    pub fn from_outcomes(outcomes: Vec<UploadOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.status == UploadStatus::Success).count();
        let failed = outcomes.len() - succeeded;
        Self { succeeded, failed, outcomes }
    }
}

//! Paper and search-result models.

use serde::{Deserialize, Serialize};

use crate::config::endpoints;

/// A research paper as served by this backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Opaque identifier from the source API.
    pub paper_id: String,

    /// Paper title.
    #[serde(default)]
    pub title: Option<String>,

    /// Work type as reported by the source ("article", "paper", ...).
    /// Open vocabulary, passed through untouched.
    #[serde(default, rename = "type")]
    pub paper_type: Option<String>,

    /// Publication year as reported by the source; no default applied.
    #[serde(default)]
    pub year: Option<i32>,

    /// Ordered list of authors.
    #[serde(default)]
    pub authors: Vec<AuthorRef>,

    /// Canonical URL of the work.
    #[serde(default)]
    pub url: Option<String>,

    /// Direct PDF URL, when the source exposes one.
    #[serde(default)]
    pub pdf_url: Option<String>,

    /// Transient selection flag. Accepted on input, never emitted or
    /// persisted.
    #[serde(default, skip_serializing)]
    pub selected: bool,
}

impl Paper {
    /// Get the paper title, falling back to "Untitled" if not available.
    #[must_use]
    pub fn title_or_default(&self) -> &str {
        self.title.as_deref().unwrap_or("Untitled")
    }

    /// Whether this paper carries a non-empty direct PDF URL, the only kind
    /// considered for upload.
    #[must_use]
    pub fn is_eligible(&self) -> bool {
        self.pdf_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Filename used when forwarding this paper's PDF:
    /// `<paperId>_<first 50 chars of title>.pdf`.
    #[must_use]
    pub fn upload_filename(&self) -> String {
        let title: String =
            self.title_or_default().chars().take(endpoints::UPLOAD_TITLE_CHARS).collect();
        format!("{}_{}.pdf", self.paper_id, title)
    }

    /// Get author names as a comma-separated string.
    #[must_use]
    pub fn author_names(&self) -> String {
        self.authors
            .iter()
            .filter_map(|a| a.name.as_ref())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An id/name author pair.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Author identifier from the source API.
    #[serde(default)]
    pub id: Option<String>,

    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
}

/// Response of the literature-search API for one query.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Matching papers for this page.
    #[serde(default)]
    pub papers: Vec<SearchHit>,

    /// Whether more results exist beyond this page.
    #[serde(default)]
    pub has_more: bool,

    /// Total match count reported by the upstream, when present.
    #[serde(default)]
    pub total: Option<i64>,
}

/// One search result item on the wire. Authors arrive nested inside an
/// authorship structure and are flattened into [`AuthorRef`]s.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    pub paper_id: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default, rename = "type")]
    pub paper_type: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub authors: Vec<Authorship>,

    #[serde(default)]
    pub url: Option<String>,

    #[serde(default)]
    pub pdf_url: Option<String>,
}

/// Nested authorship record as returned by the search API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Authorship {
    #[serde(default)]
    pub author: AuthorInfo,
}

/// Author payload inside an authorship record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInfo {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub display_name: Option<String>,
}

impl From<SearchHit> for Paper {
    fn from(hit: SearchHit) -> Self {
        let authors = hit
            .authors
            .into_iter()
            .map(|a| AuthorRef { id: a.author.id, name: a.author.display_name })
            .collect();

        Self {
            paper_id: hit.paper_id,
            title: hit.title,
            paper_type: hit.paper_type,
            year: hit.year,
            authors,
            url: hit.url,
            pdf_url: hit.pdf_url,
            selected: false,
        }
    }
}

/// Papers matching one concept of a thesis, in upstream order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResultGroup {
    /// The concept this group was searched for.
    pub concept: String,

    /// Matching papers.
    pub papers: Vec<Paper>,

    /// Total match count reported by the upstream. May exceed
    /// `papers.len()` due to pagination.
    pub total: i64,

    /// Error message when this concept's search failed. Siblings are not
    /// affected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SearchResultGroup {
    /// Build a group from one upstream search response.
    #[must_use]
    pub fn from_response(concept: String, response: SearchResponse) -> Self {
        let papers: Vec<Paper> = response.papers.into_iter().map(Paper::from).collect();
        let total = response.total.unwrap_or(papers.len() as i64);
        Self { concept, papers, total, error: None }
    }

    /// Build the empty group recorded when a concept's search fails.
    #[must_use]
    pub fn failed(concept: String, error: impl Into<String>) -> Self {
        Self { concept, papers: Vec::new(), total: 0, error: Some(error.into()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_deserialize_minimal() {
        let json = r#"{"paperId": "abc123"}"#;
        let paper: Paper = serde_json::from_str(json).unwrap();
        assert_eq!(paper.paper_id, "abc123");
        assert!(paper.title.is_none());
        assert!(paper.authors.is_empty());
        assert!(!paper.selected);
    }

    #[test]
    fn test_paper_selected_is_transient() {
        let json = r#"{"paperId": "abc123", "selected": true}"#;
        let paper: Paper = serde_json::from_str(json).unwrap();
        assert!(paper.selected);

        let out = serde_json::to_value(&paper).unwrap();
        assert!(out.get("selected").is_none());
    }

    #[test]
    fn test_paper_eligibility() {
        let mut paper = Paper { paper_id: "p1".into(), ..Paper::default() };
        assert!(!paper.is_eligible());

        paper.pdf_url = Some(String::new());
        assert!(!paper.is_eligible());

        paper.pdf_url = Some("http://example.com/a.pdf".into());
        assert!(paper.is_eligible());
    }

    #[test]
    fn test_upload_filename_truncates_title() {
        let paper = Paper {
            paper_id: "W42".into(),
            title: Some("x".repeat(80)),
            ..Paper::default()
        };
        let name = paper.upload_filename();
        assert_eq!(name, format!("W42_{}.pdf", "x".repeat(50)));
    }

    #[test]
    fn test_upload_filename_multibyte_title() {
        let paper = Paper {
            paper_id: "W7".into(),
            title: Some("é".repeat(60)),
            ..Paper::default()
        };
        // Truncation counts characters, not bytes.
        assert_eq!(paper.upload_filename(), format!("W7_{}.pdf", "é".repeat(50)));
    }

    #[test]
    fn test_search_hit_flattens_authorships() {
        let json = r#"{
            "paperId": "W1",
            "title": "Smoking and Health",
            "type": "article",
            "year": 2019,
            "url": "https://example.org/W1",
            "pdfUrl": "https://example.org/W1.pdf",
            "authors": [
                {"author": {"id": "A1", "displayName": "Jane Roe"}},
                {"author": {"id": "A2", "displayName": "John Doe"}}
            ]
        }"#;

        let hit: SearchHit = serde_json::from_str(json).unwrap();
        let paper = Paper::from(hit);
        assert_eq!(paper.paper_id, "W1");
        assert_eq!(paper.year, Some(2019));
        assert_eq!(paper.author_names(), "Jane Roe, John Doe");
        assert!(paper.is_eligible());
    }

    #[test]
    fn test_group_total_falls_back_to_len() {
        let response = SearchResponse {
            papers: vec![SearchHit { paper_id: "W1".into(), ..SearchHit::default() }],
            has_more: false,
            total: None,
        };
        let group = SearchResultGroup::from_response("smoking".into(), response);
        assert_eq!(group.total, 1);
        assert!(group.error.is_none());
    }

    #[test]
    fn test_failed_group_is_empty() {
        let group = SearchResultGroup::failed("tobacco".into(), "connection refused");
        assert!(group.papers.is_empty());
        assert_eq!(group.total, 0);
        assert_eq!(group.error.as_deref(), Some("connection refused"));
    }
}

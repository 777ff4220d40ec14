//! Concept extraction.
//!
//! Sends a thesis to the analysis backend's semantic-parsing endpoint and
//! parses the concept list out of its markdown-fenced JSON response.

use serde::Deserialize;
use serde_json::json;

use crate::client::AnalysisClient;
use crate::error::{ServiceError, ServiceResult};

/// Fence markers around the JSON blob in the `response` field. Only these
/// exact literals are stripped; other fence variants are a parse error.
const FENCE_OPEN: &str = "```json\n";
const FENCE_CLOSE: &str = "\n```";

/// Decompose a thesis statement into sub-concepts for independent search.
///
/// No retry. An empty concept list is not an error; downstream treats it as
/// "no concepts found".
///
/// # Errors
///
/// Returns error on transport failure, non-2xx response, a missing
/// `response` field, or an inner blob that is not valid JSON after
/// fence-stripping.
pub async fn extract_concepts(
    analysis: &AnalysisClient,
    thesis: &str,
) -> ServiceResult<Vec<String>> {
    let envelope = analysis.semantic_parts(json!({ "user_query": thesis })).await?;

    let response = envelope
        .get("response")
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| ServiceError::unavailable("semantic parsing response missing `response` field"))?;

    parse_concepts(response)
}

/// Strip the markdown fence and parse `{"main_concepts": [...]}`.
pub(crate) fn parse_concepts(raw: &str) -> ServiceResult<Vec<String>> {
    let inner = raw.trim();
    let inner = inner.strip_prefix(FENCE_OPEN).unwrap_or(inner);
    let inner = inner.strip_suffix(FENCE_CLOSE).unwrap_or(inner);

    #[derive(Deserialize)]
    struct MainConcepts {
        main_concepts: Vec<String>,
    }

    let parsed: MainConcepts = serde_json::from_str(inner)
        .map_err(|e| ServiceError::unavailable(format!("semantic parsing returned invalid JSON: {e}")))?;

    Ok(parsed.main_concepts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fenced_concepts() {
        let raw = "```json\n{\"main_concepts\": [\"smoking health effects\", \"tobacco policy\"]}\n```";
        let concepts = parse_concepts(raw).unwrap();
        assert_eq!(concepts, vec!["smoking health effects", "tobacco policy"]);
    }

    #[test]
    fn test_parse_unfenced_concepts() {
        let raw = "{\"main_concepts\": [\"a\", \"b\"]}";
        let concepts = parse_concepts(raw).unwrap();
        assert_eq!(concepts, vec!["a", "b"]);
    }

    #[test]
    fn test_parse_empty_concept_list_is_ok() {
        let raw = "```json\n{\"main_concepts\": []}\n```";
        assert!(parse_concepts(raw).unwrap().is_empty());
    }

    #[test]
    fn test_parse_surrounding_whitespace() {
        let raw = "  \n```json\n{\"main_concepts\": [\"a\"]}\n```\n ";
        assert_eq!(parse_concepts(raw).unwrap(), vec!["a"]);
    }

    #[test]
    fn test_parse_rejects_non_json_payload() {
        let raw = "```json\nhere are your concepts\n```";
        let err = parse_concepts(raw).unwrap_err();
        assert!(matches!(err, ServiceError::Unavailable(_)));
    }

    #[test]
    fn test_parse_rejects_wrong_shape() {
        let raw = "```json\n{\"concepts\": [\"a\"]}\n```";
        assert!(parse_concepts(raw).is_err());
    }

    #[test]
    fn test_other_fence_language_is_not_stripped() {
        // Only the ```json fence is recognized; anything else fails to parse.
        let raw = "```yaml\nmain_concepts: [a]\n```";
        assert!(parse_concepts(raw).is_err());
    }
}

//! Per-concept search fan-out.
//!
//! Issues one search per concept, all concurrently, and settles each
//! independently: a failed concept yields an empty group with an error
//! message instead of discarding its siblings. `join_all` keeps result
//! groups in input-concept order regardless of response arrival order.

use futures::future::join_all;

use crate::client::SearchClient;
use crate::models::SearchResultGroup;

/// Search the literature once per concept, concurrently.
///
/// Returns exactly one group per input concept, in input order. This is
/// best-effort aggregation of independent searches; it never fails as a
/// whole.
pub async fn search_concepts(search: &SearchClient, concepts: &[String]) -> Vec<SearchResultGroup> {
    let searches = concepts.iter().map(|concept| {
        let concept = concept.clone();
        async move {
            match search.search(&concept).await {
                Ok(response) => {
                    let group = SearchResultGroup::from_response(concept, response);
                    tracing::debug!(
                        concept = %group.concept,
                        papers = group.papers.len(),
                        total = group.total,
                        "concept search completed"
                    );
                    group
                }
                Err(e) => {
                    tracing::warn!(concept = %concept, error = %e, "concept search failed");
                    SearchResultGroup::failed(concept, e.to_string())
                }
            }
        }
    });

    join_all(searches).await
}

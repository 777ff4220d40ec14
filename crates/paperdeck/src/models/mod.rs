//! Data models for papers, search results, uploads, and collections.
//!
//! Wire-facing models use `#[serde(default)]` for optional fields and
//! camelCase renames to match the upstream APIs.

mod collection;
mod paper;
mod upload;

pub use collection::{ChatMessage, Collection};
pub use paper::{AuthorRef, Authorship, Paper, SearchHit, SearchResponse, SearchResultGroup};
pub use upload::{UploadOutcome, UploadReport, UploadStatus};

//! Orchestration flows: thesis → concepts → per-concept search → selected
//! papers → upload batch.

pub mod concepts;
pub mod fanout;
pub mod upload;

pub use concepts::extract_concepts;
pub use fanout::search_concepts;
pub use upload::upload_batch;

//! In-memory collection store.
//!
//! The authoritative persistence layer is an externally hosted document
//! store; this process keeps its working copy behind a single `RwLock`.
//! Concurrent edits from other processes are not reconciled.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;

use crate::models::{ChatMessage, Collection, Paper};

/// In-memory store of collections, keyed by id.
#[derive(Clone, Default)]
pub struct CollectionStore {
    collections: Arc<RwLock<HashMap<String, Collection>>>,
}

impl CollectionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// List all collections, most recently updated first.
    pub async fn list(&self) -> Vec<Collection> {
        let collections = self.collections.read().await;
        let mut all: Vec<Collection> = collections.values().cloned().collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        all
    }

    /// Get one collection by id.
    pub async fn get(&self, id: &str) -> Option<Collection> {
        self.collections.read().await.get(id).cloned()
    }

    /// Create a new collection.
    pub async fn create(&self, name: impl Into<String>, thesis: Option<String>) -> Collection {
        let collection = Collection::new(name, thesis);
        let mut collections = self.collections.write().await;
        collections.insert(collection.id.clone(), collection.clone());
        collection
    }

    /// Delete a collection. Returns false if it did not exist.
    pub async fn delete(&self, id: &str) -> bool {
        self.collections.write().await.remove(id).is_some()
    }

    /// Add papers to a collection, skipping ids it already holds, and bump
    /// its count and timestamp. Returns the updated collection, or `None`
    /// if the id is unknown.
    pub async fn add_papers(&self, id: &str, papers: Vec<Paper>) -> Option<Collection> {
        let mut collections = self.collections.write().await;
        let collection = collections.get_mut(id)?;

        for paper in papers {
            if collection.papers.iter().any(|p| p.paper_id == paper.paper_id) {
                continue;
            }
            collection.papers.push(paper);
        }

        collection.paper_count = collection.papers.len();
        collection.updated_at = Utc::now();
        Some(collection.clone())
    }

    /// Append a chat message to a collection. Returns the stored message,
    /// or `None` if the id is unknown.
    pub async fn append_message(
        &self,
        id: &str,
        role: impl Into<String>,
        content: impl Into<String>,
    ) -> Option<ChatMessage> {
        let mut collections = self.collections.write().await;
        let collection = collections.get_mut(id)?;

        let message = ChatMessage::new(role, content);
        collection.messages.push(message.clone());
        collection.updated_at = Utc::now();
        Some(message)
    }
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore").finish()
    }
}

//! Collection and chat message models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Paper;

/// A user-defined named grouping of papers around a research thesis.
///
/// The authoritative store is external; this model is what the backend
/// serves and keeps in memory. No cross-session reconciliation is attempted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Collection identifier.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Thesis the collection is built around.
    #[serde(default)]
    pub thesis: Option<String>,

    /// Number of papers in the collection.
    pub paper_count: usize,

    /// Last modification timestamp.
    pub updated_at: DateTime<Utc>,

    /// Papers in the collection.
    #[serde(default)]
    pub papers: Vec<Paper>,

    /// Chat history attached to this collection.
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
}

impl Collection {
    /// Create an empty collection.
    #[must_use]
    pub fn new(name: impl Into<String>, thesis: Option<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            thesis,
            paper_count: 0,
            updated_at: Utc::now(),
            papers: Vec::new(),
            messages: Vec::new(),
        }
    }
}

/// One message in a collection's document chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    /// Message identifier.
    pub id: String,

    /// "user" or "assistant".
    pub role: String,

    /// Message text.
    pub content: String,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message.
    #[must_use]
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role: role.into(),
            content: content.into(),
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_collection_is_empty() {
        let collection = Collection::new("Smoking and health", Some("effects of smoking".into()));
        assert_eq!(collection.paper_count, 0);
        assert!(collection.papers.is_empty());
        assert!(collection.messages.is_empty());
        assert!(!collection.id.is_empty());
    }

    #[test]
    fn test_collection_roundtrip() {
        let collection = Collection::new("Test", None);
        let json = serde_json::to_string(&collection).unwrap();
        let back: Collection = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, collection.id);
        assert_eq!(back.name, "Test");
        assert!(back.thesis.is_none());
    }
}

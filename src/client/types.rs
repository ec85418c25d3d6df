//! Wire-facing types exchanged with the search cluster

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::query::FieldType;

/// Opaque handle of a server-side scroll/scan session
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionHandle(pub String);

impl SessionHandle {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One matched document as returned by the cluster
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    /// Document identifier
    pub id: String,
    /// Document type tag
    pub doc_type: String,
    /// Relevance score, when the engine computed one
    pub score: Option<f64>,
    /// Document source body (a JSON object)
    pub source: Value,
}

impl Hit {
    pub fn new(id: impl Into<String>, doc_type: impl Into<String>, source: Value) -> Self {
        Self {
            id: id.into(),
            doc_type: doc_type.into(),
            score: None,
            source,
        }
    }

    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }
}

/// One page of a scroll/scan session. An empty page signals exhaustion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub hits: Vec<Hit>,
}

impl Page {
    pub fn new(hits: Vec<Hit>) -> Self {
        Self { hits }
    }

    pub fn empty() -> Self {
        Self { hits: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }
}

/// Column listing for one remote index, as resolved by the discovery
/// collaborator. Specified here only as an interface boundary.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexMetadata {
    /// Index name
    pub index: String,
    /// Column name and resolved type, in mapping order
    pub columns: Vec<(String, FieldType)>,
}

impl IndexMetadata {
    pub fn new(index: impl Into<String>, columns: Vec<(String, FieldType)>) -> Self {
        Self {
            index: index.into(),
            columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_page_signals_exhaustion() {
        assert!(Page::empty().is_empty());
        let page = Page::new(vec![Hit::new("1", "doc", json!({}))]);
        assert!(!page.is_empty());
        assert_eq!(page.len(), 1);
    }

    #[test]
    fn test_hit_builder() {
        let hit = Hit::new("7", "doc", json!({"a": 1})).with_score(0.5);
        assert_eq!(hit.id, "7");
        assert_eq!(hit.score, Some(0.5));
    }
}

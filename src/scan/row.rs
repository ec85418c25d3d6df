//! Decorated result rows
//!
//! Each emitted row is the document source merged with the engine's
//! per-document metadata (`_id`, `_type`, `_score`) and every pushdown
//! annotation from the split, so downstream consumers can see which literal
//! filter produced the row without re-deriving it.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::client::Hit;

/// One decorated result row
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRow {
    fields: Map<String, Value>,
}

impl ScanRow {
    /// Decorates a hit with metadata and pushdown annotations
    pub fn decorate(hit: Hit, pushdown: &BTreeMap<String, String>) -> Self {
        let mut fields = match hit.source {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("_source".to_string(), other);
                map
            }
        };

        fields.insert("_type".to_string(), Value::String(hit.doc_type));
        fields.insert("_id".to_string(), Value::String(hit.id));
        if let Some(score) = hit.score {
            if let Some(number) = serde_json::Number::from_f64(score) {
                fields.insert("_score".to_string(), Value::Number(number));
            }
        }
        for (column, literal) in pushdown {
            fields.insert(column.clone(), Value::String(literal.clone()));
        }

        Self { fields }
    }

    /// Returns the document identifier
    pub fn id(&self) -> Option<&str> {
        self.get("_id").and_then(Value::as_str)
    }

    /// Returns the document type tag
    pub fn doc_type(&self) -> Option<&str> {
        self.get("_type").and_then(Value::as_str)
    }

    /// Returns the relevance score
    pub fn score(&self) -> Option<f64> {
        self.get("_score").and_then(Value::as_f64)
    }

    /// Returns one field of the row
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns the full field map
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

//! Query-document AST
//!
//! The compiler accumulates clauses into this tree and serializes it once at
//! the end. Building the document functionally keeps the merge semantics
//! visible: every `and` is a conjunction, and `MatchAll` is its identity
//! element.

use serde_json::{json, Map, Value};

/// A node of the query document
#[derive(Debug, Clone, PartialEq)]
pub enum QueryAst {
    /// Matches every document (the unconstrained query)
    MatchAll,
    /// Exact term match on one field
    Term { field: String, value: Value },
    /// Inclusive range on one field; a missing side is unbounded
    Range {
        field: String,
        gte: Option<Value>,
        lte: Option<Value>,
    },
    /// Pre-formed query fragment merged verbatim
    Raw(Value),
    /// Conjunction of sub-queries
    BoolAnd(Vec<QueryAst>),
}

impl QueryAst {
    /// Term clause shorthand
    pub fn term(field: impl Into<String>, value: Value) -> Self {
        QueryAst::Term {
            field: field.into(),
            value,
        }
    }

    /// Range clause shorthand
    pub fn range(field: impl Into<String>, gte: Option<Value>, lte: Option<Value>) -> Self {
        QueryAst::Range {
            field: field.into(),
            gte,
            lte,
        }
    }

    /// Conjoins two queries, flattening nested conjunctions.
    ///
    /// `MatchAll` is the identity: conjoining it with anything returns the
    /// other side unchanged.
    pub fn and(self, other: QueryAst) -> QueryAst {
        match (self, other) {
            (QueryAst::MatchAll, rhs) => rhs,
            (lhs, QueryAst::MatchAll) => lhs,
            (QueryAst::BoolAnd(mut lhs), QueryAst::BoolAnd(rhs)) => {
                lhs.extend(rhs);
                QueryAst::BoolAnd(lhs)
            }
            (QueryAst::BoolAnd(mut lhs), rhs) => {
                lhs.push(rhs);
                QueryAst::BoolAnd(lhs)
            }
            (lhs, QueryAst::BoolAnd(mut rhs)) => {
                rhs.insert(0, lhs);
                QueryAst::BoolAnd(rhs)
            }
            (lhs, rhs) => QueryAst::BoolAnd(vec![lhs, rhs]),
        }
    }

    /// Returns true for the unconstrained query
    pub fn is_match_all(&self) -> bool {
        matches!(self, QueryAst::MatchAll)
    }

    /// Serializes this node to the engine's document format
    pub fn to_clause(&self) -> Value {
        match self {
            QueryAst::MatchAll => json!({ "match_all": {} }),
            QueryAst::Term { field, value } => {
                let mut term = Map::new();
                term.insert(field.clone(), value.clone());
                json!({ "term": term })
            }
            QueryAst::Range { field, gte, lte } => {
                let mut bounds = Map::new();
                if let Some(low) = gte {
                    bounds.insert("gte".to_string(), low.clone());
                }
                if let Some(high) = lte {
                    bounds.insert("lte".to_string(), high.clone());
                }
                let mut range = Map::new();
                range.insert(field.clone(), Value::Object(bounds));
                json!({ "range": range })
            }
            QueryAst::Raw(value) => value.clone(),
            QueryAst::BoolAnd(items) => {
                let clauses: Vec<Value> = items.iter().map(QueryAst::to_clause).collect();
                json!({ "bool": { "must": clauses } })
            }
        }
    }

    /// Serializes the whole tree as a top-level query document
    pub fn to_document(&self) -> Value {
        json!({ "query": self.to_clause() })
    }
}

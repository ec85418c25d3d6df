//! Predicate compiler
//!
//! Translates the host engine's column-domain constraints into a single
//! query document for the remote search cluster, plus a side-table of the
//! raw filter literals that went into it. Pure function, no I/O.
//!
//! Reserved column names (leading `_`) are escape hatches rather than typed
//! predicates:
//! - `_dsl` carries a pre-formed query-document string, merged verbatim
//! - `_type` is record-type filtering, which is not pushed down — fail fast
//! - any other `_<column>` is a match-helper fragment whose placeholder token
//!   is substituted with the real column name before merging

use std::collections::BTreeMap;

use serde_json::Value;

use super::ast::QueryAst;
use super::domain::{value_kind, ColumnConstraint, ValueRange};
use super::errors::{PredicateError, PredicateResult};

/// Marks a column name as a raw escape-hatch constraint
pub const RESERVED_PREFIX: &str = "_";

/// Reserved name whose literal is merged without substitution
pub const DSL_COLUMN: &str = "_dsl";

/// Reserved name for record-type filtering; never pushed down
pub const TYPE_COLUMN: &str = "_type";

/// Placeholder token replaced with the target column name in match-helper
/// fragments
pub const MATCH_COLUMN_TOKEN: &str = "@column@";

/// The compiled, immutable AND-merge result
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    /// Merged query document in the engine's format
    pub document: Value,
    /// Raw-fragment column name -> original literal, for row annotation
    pub pushdown: BTreeMap<String, String>,
}

impl CompiledQuery {
    /// Renders the merged document as a JSON string
    pub fn document_json(&self) -> String {
        self.document.to_string()
    }
}

/// Compiles an ordered constraint list into one merged query document.
///
/// All per-column clauses and raw fragments are conjoined. Note that multiple
/// ranges on the same column are also conjoined, not unioned; the merge is a
/// flat AND across every clause produced.
pub fn compile(constraints: &[ColumnConstraint]) -> PredicateResult<CompiledQuery> {
    let mut merged = QueryAst::MatchAll;
    let mut pushdown = BTreeMap::new();

    for constraint in constraints {
        if constraint.column == TYPE_COLUMN {
            return Err(PredicateError::unsupported(
                TYPE_COLUMN,
                "record-type filters are not pushed down",
            ));
        }

        if constraint.column.starts_with(RESERVED_PREFIX) {
            let fragment = compile_raw_fragment(constraint, &mut pushdown)?;
            merged = merged.and(fragment);
        } else {
            for range in &constraint.ranges {
                if let Some(clause) = compile_range(constraint, range)? {
                    merged = merged.and(clause);
                }
            }
        }
    }

    Ok(CompiledQuery {
        document: merged.to_document(),
        pushdown,
    })
}

/// Compiles one reserved-name constraint into a raw query fragment.
///
/// The constraint must be an equality against a literal string. The original
/// literal is recorded in the side-table before any substitution so the rows
/// it produces can be annotated with what the caller actually wrote.
fn compile_raw_fragment(
    constraint: &ColumnConstraint,
    pushdown: &mut BTreeMap<String, String>,
) -> PredicateResult<QueryAst> {
    let literal = match constraint.ranges.as_slice() {
        [range] => range
            .single
            .as_ref()
            .and_then(Value::as_str)
            .ok_or_else(|| PredicateError::RawFilterNotString {
                column: constraint.column.clone(),
            })?,
        _ => {
            return Err(PredicateError::RawFilterNotString {
                column: constraint.column.clone(),
            })
        }
    };

    pushdown.insert(constraint.column.clone(), literal.to_string());

    let substituted = if constraint.column == DSL_COLUMN {
        literal.to_string()
    } else {
        literal.replace(MATCH_COLUMN_TOKEN, &target_column(&constraint.column))
    };

    let parsed: Value = serde_json::from_str(&substituted).map_err(|e| {
        PredicateError::MalformedRawFilter {
            column: constraint.column.clone(),
            reason: e.to_string(),
        }
    })?;

    // A literal written as a full document gets its "query" wrapper unwrapped
    // so the fragment conjoins at clause level.
    let fragment = match parsed {
        Value::Object(mut map) if map.contains_key("query") => {
            map.remove("query").unwrap_or(Value::Null)
        }
        other => other,
    };

    Ok(QueryAst::Raw(fragment))
}

/// Derives the target column of a match-helper fragment from its reserved
/// name: the leading `_` is stripped, as is a trailing `_match` suffix when
/// the caller used the `_<column>_match` spelling.
fn target_column(reserved: &str) -> String {
    let stripped = reserved.strip_prefix(RESERVED_PREFIX).unwrap_or(reserved);
    stripped
        .strip_suffix("_match")
        .unwrap_or(stripped)
        .to_string()
}

/// Compiles one typed range into a clause, or nothing for the unconstrained
/// range.
fn compile_range(
    constraint: &ColumnConstraint,
    range: &ValueRange,
) -> PredicateResult<Option<QueryAst>> {
    if range.is_all() {
        return Ok(None);
    }

    for value in range.values() {
        if !constraint.field_type.matches(value) {
            return Err(PredicateError::TypeMismatch {
                column: constraint.column.clone(),
                expected: constraint.field_type.as_str().to_string(),
                actual: value_kind(value).to_string(),
            });
        }
    }

    let clause = if let Some(value) = &range.single {
        QueryAst::term(&constraint.column, value.clone())
    } else {
        QueryAst::range(
            &constraint.column,
            range.low.value().cloned(),
            range.high.value().cloned(),
        )
    };

    Ok(Some(clause))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::domain::FieldType;
    use serde_json::json;

    #[test]
    fn test_empty_constraints_match_everything() {
        let compiled = compile(&[]).unwrap();
        assert_eq!(compiled.document, json!({ "query": { "match_all": {} } }));
        assert!(compiled.pushdown.is_empty());
    }

    #[test]
    fn test_all_ranges_contribute_nothing() {
        let constraints = vec![ColumnConstraint::new("city", FieldType::Keyword)
            .with_range(ValueRange::all())];
        let compiled = compile(&constraints).unwrap();
        assert_eq!(compiled.document, json!({ "query": { "match_all": {} } }));
    }

    #[test]
    fn test_single_value_becomes_term() {
        let constraints = vec![ColumnConstraint::equal(
            "city",
            FieldType::Keyword,
            json!("paris"),
        )];
        let compiled = compile(&constraints).unwrap();
        assert_eq!(
            compiled.document,
            json!({ "query": { "term": { "city": "paris" } } })
        );
    }

    #[test]
    fn test_type_mismatch_rejected() {
        let constraints = vec![ColumnConstraint::equal("age", FieldType::Long, json!("x"))];
        let err = compile(&constraints).unwrap_err();
        assert_eq!(err.code(), "PREDICATE_INVALID");
    }

    #[test]
    fn test_type_column_unsupported() {
        let constraints = vec![ColumnConstraint::equal(
            "_type",
            FieldType::Keyword,
            json!("doc"),
        )];
        let err = compile(&constraints).unwrap_err();
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_dsl_passes_through_verbatim() {
        let literal = r#"{"term":{"tag":"x"}}"#;
        let constraints = vec![ColumnConstraint::equal(
            "_dsl",
            FieldType::Keyword,
            json!(literal),
        )];
        let compiled = compile(&constraints).unwrap();
        assert_eq!(
            compiled.document,
            json!({ "query": { "term": { "tag": "x" } } })
        );
        assert_eq!(compiled.pushdown.get("_dsl").unwrap(), literal);
    }

    #[test]
    fn test_query_wrapper_is_unwrapped() {
        let literal = r#"{"query":{"term":{"tag":"x"}}}"#;
        let constraints = vec![ColumnConstraint::equal(
            "_dsl",
            FieldType::Keyword,
            json!(literal),
        )];
        let compiled = compile(&constraints).unwrap();
        assert_eq!(
            compiled.document,
            json!({ "query": { "term": { "tag": "x" } } })
        );
    }

    #[test]
    fn test_raw_filter_must_be_string_equality() {
        let constraints = vec![ColumnConstraint::equal("_dsl", FieldType::Long, json!(5))];
        let err = compile(&constraints).unwrap_err();
        assert_eq!(err.code(), "PREDICATE_INVALID");

        let constraints = vec![ColumnConstraint::new("_dsl", FieldType::Keyword)
            .with_range(ValueRange::at_least(json!("x")))];
        assert!(compile(&constraints).is_err());
    }

    #[test]
    fn test_malformed_raw_literal_rejected() {
        let constraints = vec![ColumnConstraint::equal(
            "_dsl",
            FieldType::Keyword,
            json!("{not json"),
        )];
        let err = compile(&constraints).unwrap_err();
        assert!(matches!(err, PredicateError::MalformedRawFilter { .. }));
    }

    #[test]
    fn test_match_helper_substitution() {
        let literal = format!(r#"{{"match":{{"{}":"hello"}}}}"#, MATCH_COLUMN_TOKEN);
        let constraints = vec![ColumnConstraint::equal(
            "_name",
            FieldType::Keyword,
            json!(literal),
        )];
        let compiled = compile(&constraints).unwrap();
        assert_eq!(
            compiled.document,
            json!({ "query": { "match": { "name": "hello" } } })
        );
        // Side-table keeps the original, unsubstituted literal
        assert_eq!(compiled.pushdown.get("_name").unwrap(), &literal);
    }

    #[test]
    fn test_target_column_derivation() {
        assert_eq!(target_column("_name"), "name");
        assert_eq!(target_column("_name_match"), "name");
        assert_eq!(target_column("_title"), "title");
    }
}

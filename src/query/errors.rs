//! Predicate compiler error types
//!
//! Error codes:
//! - PREDICATE_INVALID (REJECT): malformed or type-mismatched constraint
//! - PREDICATE_UNSUPPORTED (REJECT): predicate shape the adapter cannot push down
//!
//! Every compile failure is fatal to the whole compile call; there are no
//! partial results.

use thiserror::Error;

/// Result type for predicate compilation
pub type PredicateResult<T> = Result<T, PredicateError>;

/// Predicate compiler errors
#[derive(Debug, Clone, Error)]
pub enum PredicateError {
    /// Raw filter column carries something other than a single string equality
    #[error("raw filter on '{column}' must be an equality against a literal string")]
    RawFilterNotString {
        /// Reserved column name the raw filter was keyed by
        column: String,
    },

    /// Raw filter literal did not parse as a query document
    #[error("raw filter on '{column}' is not a valid query document: {reason}")]
    MalformedRawFilter { column: String, reason: String },

    /// Range value kind does not match the column's declared type
    #[error("filter value kind is {actual} but column '{column}' is {expected}")]
    TypeMismatch {
        column: String,
        expected: String,
        actual: String,
    },

    /// Predicate shape the adapter does not support (e.g. a `_type` filter)
    #[error("unsupported predicate on '{column}': {reason}")]
    Unsupported { column: String, reason: String },
}

impl PredicateError {
    /// Returns the string error code
    pub fn code(&self) -> &'static str {
        match self {
            PredicateError::RawFilterNotString { .. }
            | PredicateError::MalformedRawFilter { .. }
            | PredicateError::TypeMismatch { .. } => "PREDICATE_INVALID",
            PredicateError::Unsupported { .. } => "PREDICATE_UNSUPPORTED",
        }
    }

    /// Returns true for the unsupported-predicate family
    pub fn is_unsupported(&self) -> bool {
        matches!(self, PredicateError::Unsupported { .. })
    }

    /// Create an unsupported-predicate error
    pub fn unsupported(column: impl Into<String>, reason: impl Into<String>) -> Self {
        PredicateError::Unsupported {
            column: column.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = PredicateError::RawFilterNotString {
            column: "_dsl".into(),
        };
        assert_eq!(err.code(), "PREDICATE_INVALID");
        assert!(!err.is_unsupported());

        let err = PredicateError::unsupported("_type", "type filters are not pushed down");
        assert_eq!(err.code(), "PREDICATE_UNSUPPORTED");
        assert!(err.is_unsupported());
    }

    #[test]
    fn test_error_display_names_column() {
        let err = PredicateError::TypeMismatch {
            column: "age".into(),
            expected: "long".into(),
            actual: "string".into(),
        };
        let display = format!("{}", err);
        assert!(display.contains("age"));
        assert!(display.contains("long"));
    }
}

//! Column-domain constraint model
//!
//! The host engine hands the adapter an ordered list of per-column domains.
//! Within one [`ColumnConstraint`] the ranges describe alternative value
//! intervals for that column; across constraints the relationship is a
//! conjunction.

use serde_json::Value;

/// Scalar type tag for a pushed-down column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    Boolean,
    Integer,
    Long,
    Double,
    Keyword,
    Text,
    Date,
    Binary,
}

impl FieldType {
    /// Returns the engine-side type name
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Boolean => "boolean",
            FieldType::Integer => "integer",
            FieldType::Long => "long",
            FieldType::Double => "double",
            FieldType::Keyword => "keyword",
            FieldType::Text => "text",
            FieldType::Date => "date",
            FieldType::Binary => "binary",
        }
    }

    /// Checks a filter value against this type. Exact kind match, no coercion.
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldType::Boolean => value.is_boolean(),
            FieldType::Integer | FieldType::Long => value.is_i64() || value.is_u64(),
            FieldType::Double => value.is_number(),
            FieldType::Keyword | FieldType::Text | FieldType::Binary => value.is_string(),
            // Dates arrive either as epoch numbers or formatted strings
            FieldType::Date => value.is_number() || value.is_string(),
        }
    }
}

/// Describes the kind of a JSON value for error messages
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// One side of a value interval
#[derive(Debug, Clone, PartialEq)]
pub enum RangeBound {
    /// No constraint on this side
    Unbounded,
    /// Inclusive bound at the given value
    Value(Value),
}

impl RangeBound {
    /// Returns the bound value, if bounded
    pub fn value(&self) -> Option<&Value> {
        match self {
            RangeBound::Unbounded => None,
            RangeBound::Value(v) => Some(v),
        }
    }
}

/// A single value interval on one column
#[derive(Debug, Clone, PartialEq)]
pub struct ValueRange {
    /// Inclusive lower bound
    pub low: RangeBound,
    /// Inclusive upper bound
    pub high: RangeBound,
    /// Exact value, when the interval collapses to a point
    pub single: Option<Value>,
}

impl ValueRange {
    /// Unconstrained interval: matches every value
    pub fn all() -> Self {
        Self {
            low: RangeBound::Unbounded,
            high: RangeBound::Unbounded,
            single: None,
        }
    }

    /// Point interval: column = value
    pub fn equal(value: Value) -> Self {
        Self {
            low: RangeBound::Value(value.clone()),
            high: RangeBound::Value(value.clone()),
            single: Some(value),
        }
    }

    /// Half-open interval [value, +inf)
    pub fn at_least(value: Value) -> Self {
        Self {
            low: RangeBound::Value(value),
            high: RangeBound::Unbounded,
            single: None,
        }
    }

    /// Half-open interval (-inf, value]
    pub fn at_most(value: Value) -> Self {
        Self {
            low: RangeBound::Unbounded,
            high: RangeBound::Value(value),
            single: None,
        }
    }

    /// Closed interval [low, high]
    pub fn between(low: Value, high: Value) -> Self {
        Self {
            low: RangeBound::Value(low),
            high: RangeBound::Value(high),
            single: None,
        }
    }

    /// Returns true if the interval is unconstrained on both sides
    pub fn is_all(&self) -> bool {
        self.single.is_none()
            && matches!(self.low, RangeBound::Unbounded)
            && matches!(self.high, RangeBound::Unbounded)
    }

    /// Returns true if the interval is a single exact value
    pub fn is_single_value(&self) -> bool {
        self.single.is_some()
    }

    /// Iterates the bounded values of this interval, for type checking
    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.single
            .iter()
            .chain(self.low.value().into_iter())
            .chain(self.high.value().into_iter())
    }
}

/// One filtered column: its name, declared type, and value intervals.
///
/// The intervals are alternatives (an OR) from the host engine's point of
/// view. The merge strategy nevertheless conjoins them — see the compiler.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnConstraint {
    /// Column name; reserved names start with `_`
    pub column: String,
    /// Declared scalar type of the column
    pub field_type: FieldType,
    /// Ordered, disjoint value intervals
    pub ranges: Vec<ValueRange>,
}

impl ColumnConstraint {
    /// Creates a constraint with no ranges
    pub fn new(column: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            column: column.into(),
            field_type,
            ranges: Vec::new(),
        }
    }

    /// Adds a range
    pub fn with_range(mut self, range: ValueRange) -> Self {
        self.ranges.push(range);
        self
    }

    /// Equality constraint shorthand
    pub fn equal(column: impl Into<String>, field_type: FieldType, value: Value) -> Self {
        Self::new(column, field_type).with_range(ValueRange::equal(value))
    }
}

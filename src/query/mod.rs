//! Predicate Compiler subsystem
//!
//! Translates per-column domain constraints into a single merged query
//! document for the remote cluster.
//!
//! # Merge semantics
//!
//! - Across columns and raw fragments: conjunction (AND)
//! - Within one column: each range still produces its own conjoined clause,
//!   so disjoint ranges on the same column are ANDed together. This mirrors
//!   the merge strategy of the protocol this adapter federates to and is an
//!   explicit, tested property — not something the compiler papers over.

mod ast;
mod compiler;
mod domain;
mod errors;

pub use ast::QueryAst;
pub use compiler::{
    compile, CompiledQuery, DSL_COLUMN, MATCH_COLUMN_TOKEN, RESERVED_PREFIX, TYPE_COLUMN,
};
pub use domain::{value_kind, ColumnConstraint, FieldType, RangeBound, ValueRange};
pub use errors::{PredicateError, PredicateResult};

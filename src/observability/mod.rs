//! Structured event logging for the plan/scan pipeline
//!
//! The planner and executor emit typed [`ScanEvent`]s rendered as one JSON
//! line each, synchronously. There is no metrics surface; the log is the
//! observability contract.

mod events;
mod logger;

pub use events::ScanEvent;
pub use logger::{emit, render, Severity};

//! Structured JSON event log
//!
//! - One log line = one event
//! - Deterministic key ordering
//! - Synchronous, no buffering
//!
//! Lines go to stdout; WARN and above go to stderr.

use std::io::{self, Write};

use serde_json::{Map, Value};

use super::events::ScanEvent;

/// Log severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Debug-level detail
    Trace = 0,
    /// Normal operations
    Info = 1,
    /// Recoverable issues
    Warn = 2,
    /// Operation failures
    Error = 3,
}

impl Severity {
    /// Returns the string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Emits one event as a single JSON line
pub fn emit(severity: Severity, event: &ScanEvent) {
    if severity >= Severity::Warn {
        emit_to(severity, event, &mut io::stderr());
    } else {
        emit_to(severity, event, &mut io::stdout());
    }
}

fn emit_to<W: Write>(severity: Severity, event: &ScanEvent, writer: &mut W) {
    let line = render(severity, event);
    // A failed log write must never fail the operation being logged
    let _ = writeln!(writer, "{}", line);
}

/// Renders an event to its log line. `serde_json::Map` stores keys in a
/// BTreeMap, so they serialize in sorted order and the layout is
/// deterministic for a given event shape.
pub fn render(severity: Severity, event: &ScanEvent) -> String {
    let mut map = Map::new();
    map.insert("event".to_string(), Value::String(event.name().to_string()));
    map.insert(
        "severity".to_string(),
        Value::String(severity.as_str().to_string()),
    );
    for (key, value) in event.fields() {
        map.insert(key.to_string(), Value::String(value));
    }
    Value::Object(map).to_string()
}

//! Typed adapter events
//!
//! One variant per observable moment in the plan/scan pipeline. Events carry
//! only what an operator needs to follow a query across splits.

/// An observable adapter event
#[derive(Debug, Clone, PartialEq)]
pub enum ScanEvent {
    /// Split planning finished
    SplitsPlanned {
        index: String,
        splits: usize,
        shard_aware: bool,
    },
    /// A scan session was opened for a split
    ScanOpened { index: String, session: String },
    /// One page was fetched from an open session
    PageFetched { session: String, rows: usize },
    /// A scan session was explicitly terminated
    ScanClosed { session: String },
    /// A scan operation failed
    ScanFailed { session: String, code: String },
}

impl ScanEvent {
    /// Returns the event name
    pub fn name(&self) -> &'static str {
        match self {
            ScanEvent::SplitsPlanned { .. } => "splits_planned",
            ScanEvent::ScanOpened { .. } => "scan_opened",
            ScanEvent::PageFetched { .. } => "page_fetched",
            ScanEvent::ScanClosed { .. } => "scan_closed",
            ScanEvent::ScanFailed { .. } => "scan_failed",
        }
    }

    /// Returns the event fields as key/value pairs
    pub fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            ScanEvent::SplitsPlanned {
                index,
                splits,
                shard_aware,
            } => vec![
                ("index", index.clone()),
                ("splits", splits.to_string()),
                ("shard_aware", shard_aware.to_string()),
            ],
            ScanEvent::ScanOpened { index, session } => {
                vec![("index", index.clone()), ("session", session.clone())]
            }
            ScanEvent::PageFetched { session, rows } => {
                vec![("session", session.clone()), ("rows", rows.to_string())]
            }
            ScanEvent::ScanClosed { session } => vec![("session", session.clone())],
            ScanEvent::ScanFailed { session, code } => {
                vec![("session", session.clone()), ("code", code.clone())]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_names() {
        let event = ScanEvent::PageFetched {
            session: "s1".into(),
            rows: 3,
        };
        assert_eq!(event.name(), "page_fetched");
    }

    #[test]
    fn test_event_fields() {
        let event = ScanEvent::SplitsPlanned {
            index: "logs".into(),
            splits: 3,
            shard_aware: true,
        };
        let fields = event.fields();
        assert!(fields.contains(&("splits", "3".to_string())));
        assert!(fields.contains(&("shard_aware", "true".to_string())));
    }
}

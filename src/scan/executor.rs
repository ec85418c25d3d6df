//! Scan executor
//!
//! Consumes one split descriptor: decodes its scan request, opens the
//! server-side session, and hands out a [`DocumentStream`] cursor. Each split
//! gets its own session and stream; streams for different splits are
//! independent and may run on different workers.

use std::sync::Arc;

use super::errors::ScanResult;
use super::stream::DocumentStream;
use crate::client::SearchClient;
use crate::observability::{emit, ScanEvent, Severity};
use crate::split::SplitDescriptor;

/// Executes split descriptors against the cluster
pub struct ScanExecutor {
    client: Arc<dyn SearchClient>,
}

impl ScanExecutor {
    /// Creates an executor over the given cluster client
    pub fn new(client: Arc<dyn SearchClient>) -> Self {
        Self { client }
    }

    /// Opens a split's scan session and returns its row stream.
    ///
    /// A malformed serialized request fails here, before any network call;
    /// no partial stream is returned. The returned stream starts in
    /// `FirstFetchPending` with an empty buffer because the initiation
    /// response for this scan mode carries no rows.
    pub fn open(&self, split: &SplitDescriptor) -> ScanResult<DocumentStream> {
        let request = split.request()?;
        let handle = self.client.open_scan(&request)?;

        emit(
            Severity::Info,
            &ScanEvent::ScanOpened {
                index: request.index.clone(),
                session: handle.to_string(),
            },
        );

        Ok(DocumentStream::new(
            Arc::clone(&self.client),
            handle,
            split.session_timeout,
            split.pushdown.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockSearchClient;
    use crate::scan::stream::StreamState;
    use crate::split::{ScanRequest, TableIdentity};
    use serde_json::json;
    use std::collections::BTreeMap;
    use std::time::Duration;

    fn split() -> SplitDescriptor {
        let request = ScanRequest::new("logs", json!({"query": {"match_all": {}}}), 10, 60_000);
        SplitDescriptor::new(
            TableIdentity::new("default", "logs"),
            &request,
            Duration::from_secs(60),
            BTreeMap::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_open_starts_in_first_fetch_pending() {
        let executor = ScanExecutor::new(Arc::new(MockSearchClient::new()));
        let stream = executor.open(&split()).unwrap();
        assert_eq!(stream.state(), StreamState::FirstFetchPending);
    }

    #[test]
    fn test_corrupt_split_fails_before_any_network_call() {
        let client = Arc::new(MockSearchClient::new());
        let executor = ScanExecutor::new(client.clone());

        let mut bad = split();
        let last = bad.scan_request.len() - 1;
        bad.scan_request[last] ^= 0x01;

        assert!(executor.open(&bad).is_err());
        assert!(client.opened().is_empty());
    }
}

//! In-memory scripted search client
//!
//! Backs the integration suites and lets downstream hosts test their wiring
//! without a live cluster. Pages are scripted per index; every session opened
//! against that index replays its own copy of the script. Failures can be
//! injected per call site.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use uuid::Uuid;

use super::types::{IndexMetadata, Page, SessionHandle};
use super::{ClientError, ClientResult, SearchClient};
use crate::split::ScanRequest;

#[derive(Default)]
struct MockState {
    topology: HashMap<String, Vec<u32>>,
    scripts: HashMap<String, Vec<Page>>,
    metadata: HashMap<String, IndexMetadata>,
    sessions: HashMap<String, VecDeque<Page>>,
    opened: Vec<ScanRequest>,
    cleared: Vec<String>,
    continue_calls: usize,
    fail_topology: bool,
    fail_continue_on_call: Option<usize>,
}

/// Scripted [`SearchClient`] for tests
#[derive(Default)]
pub struct MockSearchClient {
    state: Mutex<MockState>,
}

impl MockSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the shard topology of an index
    pub fn with_topology(self, index: impl Into<String>, shards: Vec<u32>) -> Self {
        self.state.lock().unwrap().topology.insert(index.into(), shards);
        self
    }

    /// Scripts the pages every session on this index will replay
    pub fn with_pages(self, index: impl Into<String>, pages: Vec<Page>) -> Self {
        self.state.lock().unwrap().scripts.insert(index.into(), pages);
        self
    }

    /// Scripts the discovery response for an index
    pub fn with_metadata(self, metadata: IndexMetadata) -> Self {
        self.state
            .lock()
            .unwrap()
            .metadata
            .insert(metadata.index.clone(), metadata);
        self
    }

    /// Makes topology lookups fail
    pub fn fail_topology(self) -> Self {
        self.state.lock().unwrap().fail_topology = true;
        self
    }

    /// Makes the n-th continue call (1-based) fail
    pub fn fail_continue_on_call(self, call: usize) -> Self {
        self.state.lock().unwrap().fail_continue_on_call = Some(call);
        self
    }

    /// Scan requests passed to `open_scan`, in order
    pub fn opened(&self) -> Vec<ScanRequest> {
        self.state.lock().unwrap().opened.clone()
    }

    /// Session handles passed to `clear_scan`, in order
    pub fn cleared(&self) -> Vec<String> {
        self.state.lock().unwrap().cleared.clone()
    }

    /// Total number of continue calls issued
    pub fn continue_calls(&self) -> usize {
        self.state.lock().unwrap().continue_calls
    }
}

impl SearchClient for MockSearchClient {
    fn shard_topology(&self, index: &str) -> ClientResult<Vec<u32>> {
        let state = self.state.lock().unwrap();
        if state.fail_topology {
            return Err(ClientError::network("shard topology unavailable"));
        }
        state
            .topology
            .get(index)
            .cloned()
            .ok_or_else(|| ClientError::network(format!("unknown index: {}", index)))
    }

    fn open_scan(&self, request: &ScanRequest) -> ClientResult<SessionHandle> {
        let mut state = self.state.lock().unwrap();
        let script: VecDeque<Page> = state
            .scripts
            .get(&request.index)
            .cloned()
            .unwrap_or_default()
            .into();
        let handle = Uuid::new_v4().to_string();
        state.sessions.insert(handle.clone(), script);
        state.opened.push(request.clone());
        Ok(SessionHandle::new(handle))
    }

    fn continue_scan(&self, handle: &SessionHandle, _keep_alive: Duration) -> ClientResult<Page> {
        let mut state = self.state.lock().unwrap();
        state.continue_calls += 1;
        if state.fail_continue_on_call == Some(state.continue_calls) {
            return Err(ClientError::network("continue scan failed"));
        }
        let session = state
            .sessions
            .get_mut(handle.as_str())
            .ok_or_else(|| ClientError::SessionNotFound {
                handle: handle.to_string(),
            })?;
        Ok(session.pop_front().unwrap_or_else(Page::empty))
    }

    fn clear_scan(&self, handle: &SessionHandle) -> ClientResult<()> {
        let mut state = self.state.lock().unwrap();
        state.cleared.push(handle.to_string());
        state.sessions.remove(handle.as_str());
        Ok(())
    }

    fn index_metadata(&self, index: &str) -> ClientResult<IndexMetadata> {
        let state = self.state.lock().unwrap();
        state
            .metadata
            .get(index)
            .cloned()
            .ok_or_else(|| ClientError::mapping(format!("no mapping for index: {}", index)))
    }
}

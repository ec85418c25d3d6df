//! Pull cursor over one scan session
//!
//! The underlying protocol has a quirk: in scan mode the initiation response
//! carries no rows, so one continue call is required before any data arrives.
//! That is modeled as its own state, [`StreamState::FirstFetchPending`],
//! rather than folded invisibly into `has_next`.
//!
//! A stream has a single owner and must be driven sequentially; the session
//! handle and buffered page are mutated in place. Every continue call
//! re-extends the server-side session TTL, so a consumer that stops pulling
//! without calling [`DocumentStream::close`] leaks a live session until the
//! TTL elapses.

use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;
use std::time::Duration;

use super::errors::{ScanError, ScanResult};
use super::row::ScanRow;
use crate::client::{SearchClient, SessionHandle};
use crate::observability::{emit, ScanEvent, Severity};

/// Lifecycle states of a scan stream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    /// Session opened; the protocol requires one continue call before data
    FirstFetchPending,
    /// At least one page fetched, more may follow
    Fetching,
    /// An empty page was returned; the session has no more data
    Exhausted,
    /// The session was explicitly terminated
    Closed,
}

/// Pull-based iterator over the rows of one split
pub struct DocumentStream {
    client: Arc<dyn SearchClient>,
    handle: SessionHandle,
    keep_alive: Duration,
    pushdown: BTreeMap<String, String>,
    buffer: VecDeque<ScanRow>,
    state: StreamState,
}

impl DocumentStream {
    pub(crate) fn new(
        client: Arc<dyn SearchClient>,
        handle: SessionHandle,
        keep_alive: Duration,
        pushdown: BTreeMap<String, String>,
    ) -> Self {
        Self {
            client,
            handle,
            keep_alive,
            pushdown,
            buffer: VecDeque::new(),
            state: StreamState::FirstFetchPending,
        }
    }

    /// Returns the current lifecycle state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Returns the session handle this stream owns
    pub fn session(&self) -> &SessionHandle {
        &self.handle
    }

    /// Returns true if another row is available, fetching the next page when
    /// the buffer is empty.
    ///
    /// A network failure surfaces here as an error and leaves the session
    /// un-terminated; the caller should still attempt [`Self::close`] as
    /// best-effort cleanup.
    pub fn has_next(&mut self) -> ScanResult<bool> {
        if !self.buffer.is_empty() {
            return Ok(true);
        }
        match self.state {
            StreamState::Exhausted | StreamState::Closed => Ok(false),
            StreamState::FirstFetchPending | StreamState::Fetching => self.fetch_page(),
        }
    }

    /// Returns the next buffered row. Callers drive the stream with
    /// [`Self::has_next`]; `None` here means the buffer is empty.
    pub fn next(&mut self) -> Option<ScanRow> {
        self.buffer.pop_front()
    }

    /// Terminates the scan session.
    ///
    /// The caller contract is one close per stream, on every exit path.
    /// After a successful close the stream reports no further rows; a repeat
    /// close returns Ok without another termination call.
    pub fn close(&mut self) -> ScanResult<()> {
        if self.state == StreamState::Closed {
            return Ok(());
        }
        self.client.clear_scan(&self.handle).map_err(|source| {
            let err = ScanError::Io { source };
            self.emit_failure(&err);
            err
        })?;
        self.state = StreamState::Closed;
        // Rows not yet handed out die with the session
        self.buffer.clear();
        emit(
            Severity::Info,
            &ScanEvent::ScanClosed {
                session: self.handle.to_string(),
            },
        );
        Ok(())
    }

    fn fetch_page(&mut self) -> ScanResult<bool> {
        let page = self
            .client
            .continue_scan(&self.handle, self.keep_alive)
            .map_err(|source| {
                let err = ScanError::Io { source };
                self.emit_failure(&err);
                err
            })?;

        self.state = StreamState::Fetching;
        emit(
            Severity::Trace,
            &ScanEvent::PageFetched {
                session: self.handle.to_string(),
                rows: page.len(),
            },
        );

        if page.is_empty() {
            self.state = StreamState::Exhausted;
            return Ok(false);
        }

        self.buffer = page
            .hits
            .into_iter()
            .map(|hit| ScanRow::decorate(hit, &self.pushdown))
            .collect();
        Ok(true)
    }

    fn emit_failure(&self, err: &ScanError) {
        emit(
            Severity::Error,
            &ScanEvent::ScanFailed {
                session: self.handle.to_string(),
                code: err.code().to_string(),
            },
        );
    }
}

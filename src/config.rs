//! Session-scoped scan configuration
//!
//! Hosts supply these per query session; everything has a conservative
//! default so an empty config section is valid.

use std::time::Duration;

use serde::Deserialize;

/// Default page size for scan sessions
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default server-side session TTL
pub const DEFAULT_SESSION_TIMEOUT: Duration = Duration::from_secs(60);

/// Per-session scan parameters
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScanParams {
    /// Maximum hits returned per scan page
    pub page_size: u32,
    /// Server-side session TTL, re-extended on every continue call
    pub session_timeout: Duration,
    /// Produce one split per shard instead of a single whole-table split
    pub shard_aware: bool,
}

impl Default for ScanParams {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            session_timeout: DEFAULT_SESSION_TIMEOUT,
            shard_aware: false,
        }
    }
}

impl ScanParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the page size
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Sets the session timeout
    pub fn with_session_timeout(mut self, timeout: Duration) -> Self {
        self.session_timeout = timeout;
        self
    }

    /// Enables or disables shard-aware split planning
    pub fn with_shard_aware(mut self, shard_aware: bool) -> Self {
        self.shard_aware = shard_aware;
        self
    }
}

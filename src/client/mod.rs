//! Downstream search-cluster interface
//!
//! The cluster-version wire encoding lives behind [`SearchClient`]; this core
//! only depends on the scan protocol's shape: initiate a scan session,
//! continue it page by page, terminate it. No call is retried at this layer —
//! every network failure surfaces to the caller immediately.

pub mod mock;
mod types;

use std::time::Duration;

use thiserror::Error;

use crate::split::ScanRequest;

pub use mock::MockSearchClient;
pub use types::{Hit, IndexMetadata, Page, SessionHandle};

/// Result type for cluster calls
pub type ClientResult<T> = Result<T, ClientError>;

/// Failures from the remote cluster or the transport beneath it
#[derive(Debug, Clone, Error)]
pub enum ClientError {
    /// Transport or cluster-side failure
    #[error("cluster call failed: {message}")]
    Network { message: String },

    /// Failure from the excluded mapping/discovery collaborator, carried
    /// through opaquely and treated as fatal
    #[error("mapping resolution failed: {message}")]
    Mapping { message: String },

    /// The cluster no longer knows the session handle
    #[error("scan session not found: {handle}")]
    SessionNotFound { handle: String },
}

impl ClientError {
    /// Create a network error
    pub fn network(message: impl Into<String>) -> Self {
        ClientError::Network {
            message: message.into(),
        }
    }

    /// Create an opaque mapping error
    pub fn mapping(message: impl Into<String>) -> Self {
        ClientError::Mapping {
            message: message.into(),
        }
    }
}

/// Blocking client for the remote search cluster's scan protocol.
///
/// One implementation exists per cluster wire version; the core never looks
/// behind this trait.
pub trait SearchClient: Send + Sync {
    /// Returns the ordered shard ids of an index
    fn shard_topology(&self, index: &str) -> ClientResult<Vec<u32>>;

    /// Submits a scan-initiation request and returns the session handle.
    ///
    /// In scan mode the initiation response carries no rows; the first page
    /// must be pulled with [`SearchClient::continue_scan`].
    fn open_scan(&self, request: &ScanRequest) -> ClientResult<SessionHandle>;

    /// Fetches the next page of an open session, re-extending its server-side
    /// TTL by `keep_alive`. An empty page means the session is exhausted.
    fn continue_scan(&self, handle: &SessionHandle, keep_alive: Duration) -> ClientResult<Page>;

    /// Terminates a session, releasing its server-side state
    fn clear_scan(&self, handle: &SessionHandle) -> ClientResult<()>;

    /// Resolves the column listing of an index (discovery boundary)
    fn index_metadata(&self, index: &str) -> ClientResult<IndexMetadata>;
}

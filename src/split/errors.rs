//! Split planner error types
//!
//! Error codes:
//! - SPLIT_TOPOLOGY: shard topology could not be retrieved; the whole plan
//!   call fails, there is no silent fallback to a single split
//! - IO_ERROR: descriptor serialization failed

use thiserror::Error;

use super::codec::CodecError;
use crate::client::ClientError;

/// Result type for planning operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Split planning errors
#[derive(Debug, Clone, Error)]
pub enum PlanError {
    /// Shard topology lookup failed
    #[error("shard topology for '{index}' unavailable: {source}")]
    Topology {
        index: String,
        #[source]
        source: ClientError,
    },

    /// Scan request could not be serialized into a descriptor
    #[error("scan request serialization failed: {source}")]
    Encode {
        #[source]
        source: CodecError,
    },
}

impl PlanError {
    /// Returns the string error code
    pub fn code(&self) -> &'static str {
        match self {
            PlanError::Topology { .. } => "SPLIT_TOPOLOGY",
            PlanError::Encode { .. } => "IO_ERROR",
        }
    }
}

impl From<CodecError> for PlanError {
    fn from(source: CodecError) -> Self {
        PlanError::Encode { source }
    }
}

//! Scan executor error types
//!
//! Everything here carries the IO_ERROR code: a malformed split token or a
//! network failure against the scan endpoints. Failures are fatal to the
//! operation in progress and never retried; rows already emitted from a split
//! stay emitted.

use thiserror::Error;

use crate::client::ClientError;
use crate::split::CodecError;

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Scan executor errors
#[derive(Debug, Clone, Error)]
pub enum ScanError {
    /// The split's serialized scan request did not decode
    #[error("malformed scan request in split: {source}")]
    MalformedRequest {
        #[source]
        source: CodecError,
    },

    /// A scan endpoint call failed
    #[error("scan call failed: {source}")]
    Io {
        #[source]
        source: ClientError,
    },
}

impl ScanError {
    /// Returns the string error code
    pub fn code(&self) -> &'static str {
        "IO_ERROR"
    }
}

impl From<CodecError> for ScanError {
    fn from(source: CodecError) -> Self {
        ScanError::MalformedRequest { source }
    }
}

impl From<ClientError> for ScanError {
    fn from(source: ClientError) -> Self {
        ScanError::Io { source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_scan_errors_are_io() {
        let err: ScanError = ClientError::network("down").into();
        assert_eq!(err.code(), "IO_ERROR");

        let err: ScanError = CodecError::Truncated {
            expected: 8,
            actual: 2,
        }
        .into();
        assert_eq!(err.code(), "IO_ERROR");
    }
}

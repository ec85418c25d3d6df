//! Scan-initiation request wire schema
//!
//! The request is the split token's payload: everything an executor in any
//! process needs to open the scan session. The schema is explicit and
//! versioned so the round trip stays byte-stable across builds.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::codec::{decode_frame, encode_frame, CodecError, CodecResult};

/// Wire schema version of [`ScanRequest`]
pub const WIRE_VERSION: u32 = 1;

/// A serialized scan-initiation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Wire schema version
    pub version: u32,
    /// Target index
    pub index: String,
    /// Compiled query document
    pub query: Value,
    /// Page size for every scan page
    pub page_size: u32,
    /// Scan-mode flag: the initiation response carries no rows
    pub scan_mode: bool,
    /// Server-side session TTL in milliseconds
    pub session_timeout_ms: u64,
    /// Shard routing hint (`"_shards:<id>"`), absent for whole-table scans
    pub routing: Option<String>,
}

impl ScanRequest {
    /// Creates a whole-table scan request
    pub fn new(
        index: impl Into<String>,
        query: Value,
        page_size: u32,
        session_timeout_ms: u64,
    ) -> Self {
        Self {
            version: WIRE_VERSION,
            index: index.into(),
            query,
            page_size,
            scan_mode: true,
            session_timeout_ms,
            routing: None,
        }
    }

    /// Scopes the request to one shard via a routing preference hint
    pub fn with_shard(mut self, shard: u32) -> Self {
        self.routing = Some(format!("_shards:{}", shard));
        self
    }

    /// Serializes into framed bytes
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let payload = serde_json::to_vec(self).map_err(|e| CodecError::Malformed {
            reason: e.to_string(),
        })?;
        Ok(encode_frame(&payload))
    }

    /// Deserializes from framed bytes, verifying integrity and version
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let payload = decode_frame(bytes)?;
        let request: ScanRequest =
            serde_json::from_slice(payload).map_err(|e| CodecError::Malformed {
                reason: e.to_string(),
            })?;
        if request.version != WIRE_VERSION {
            return Err(CodecError::UnsupportedVersion {
                version: request.version,
            });
        }
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> ScanRequest {
        ScanRequest::new("logs", json!({"query": {"match_all": {}}}), 100, 60_000)
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let original = request().with_shard(2);
        let bytes = original.encode().unwrap();
        let decoded = ScanRequest::decode(&bytes).unwrap();
        assert_eq!(decoded, original);
        // Re-encoding is byte-identical
        assert_eq!(decoded.encode().unwrap(), bytes);
    }

    #[test]
    fn test_shard_routing_hint() {
        let req = request().with_shard(3);
        assert_eq!(req.routing.as_deref(), Some("_shards:3"));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let mut req = request();
        req.version = 99;
        let bytes = req.encode().unwrap();
        let err = ScanRequest::decode(&bytes).unwrap_err();
        assert!(matches!(err, CodecError::UnsupportedVersion { version: 99 }));
    }

    #[test]
    fn test_garbage_payload_rejected() {
        let frame = encode_frame(b"not a scan request");
        let err = ScanRequest::decode(&frame).unwrap_err();
        assert!(matches!(err, CodecError::Malformed { .. }));
    }
}

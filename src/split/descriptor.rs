//! Split descriptors
//!
//! A split is one unit of parallel table-scan work. The descriptor is created
//! once by the planner, possibly handed to a different process, and consumed
//! exactly once by an executor; after that its scan session is torn down and
//! the descriptor is dead.

use std::collections::BTreeMap;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};

use super::codec::{decode_frame, encode_frame, CodecError, CodecResult};
use super::request::ScanRequest;

/// Identity of a federated table: host-engine schema plus remote index name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableIdentity {
    /// Host-engine schema the table lives in
    pub schema: String,
    /// Table name, which is the remote index name
    pub table: String,
}

impl TableIdentity {
    pub fn new(schema: impl Into<String>, table: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            table: table.into(),
        }
    }

    /// Returns the remote index this table maps to
    pub fn index(&self) -> &str {
        &self.table
    }
}

impl std::fmt::Display for TableIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.schema, self.table)
    }
}

/// One resumable unit of scan work
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitDescriptor {
    /// Table this split scans
    pub table: TableIdentity,
    /// Framed [`ScanRequest`] bytes, byte-stable across processes
    pub scan_request: Vec<u8>,
    /// Server-side session TTL for every continue call
    pub session_timeout: Duration,
    /// Raw-fragment column name -> original literal, carried through so rows
    /// can be annotated wherever the split executes
    pub pushdown: BTreeMap<String, String>,
}

impl SplitDescriptor {
    /// Creates a descriptor from an already-built scan request
    pub fn new(
        table: TableIdentity,
        request: &ScanRequest,
        session_timeout: Duration,
        pushdown: BTreeMap<String, String>,
    ) -> CodecResult<Self> {
        Ok(Self {
            table,
            scan_request: request.encode()?,
            session_timeout,
            pushdown,
        })
    }

    /// Decodes the embedded scan request
    pub fn request(&self) -> CodecResult<ScanRequest> {
        ScanRequest::decode(&self.scan_request)
    }

    /// Serializes the whole descriptor into framed bytes
    pub fn encode(&self) -> CodecResult<Vec<u8>> {
        let payload = serde_json::to_vec(self).map_err(|e| CodecError::Malformed {
            reason: e.to_string(),
        })?;
        Ok(encode_frame(&payload))
    }

    /// Deserializes a descriptor from framed bytes
    pub fn decode(bytes: &[u8]) -> CodecResult<Self> {
        let payload = decode_frame(bytes)?;
        serde_json::from_slice(payload).map_err(|e| CodecError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Renders the descriptor as a printable token
    pub fn token(&self) -> CodecResult<String> {
        Ok(BASE64.encode(self.encode()?))
    }

    /// Parses a descriptor from a printable token
    pub fn from_token(token: &str) -> CodecResult<Self> {
        let bytes = BASE64.decode(token).map_err(|e| CodecError::Malformed {
            reason: e.to_string(),
        })?;
        Self::decode(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn descriptor() -> SplitDescriptor {
        let request = ScanRequest::new("logs", json!({"query": {"match_all": {}}}), 50, 30_000);
        let mut pushdown = BTreeMap::new();
        pushdown.insert("_dsl".to_string(), r#"{"term":{"a":1}}"#.to_string());
        SplitDescriptor::new(
            TableIdentity::new("default", "logs"),
            &request,
            Duration::from_secs(30),
            pushdown,
        )
        .unwrap()
    }

    #[test]
    fn test_descriptor_round_trip_preserves_request_bytes() {
        let original = descriptor();
        let decoded = SplitDescriptor::decode(&original.encode().unwrap()).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(decoded.scan_request, original.scan_request);
    }

    #[test]
    fn test_token_round_trip() {
        let original = descriptor();
        let token = original.token().unwrap();
        let parsed = SplitDescriptor::from_token(&token).unwrap();
        assert_eq!(parsed, original);
    }

    #[test]
    fn test_embedded_request_decodes() {
        let desc = descriptor();
        let request = desc.request().unwrap();
        assert_eq!(request.index, "logs");
        assert_eq!(request.page_size, 50);
    }

    #[test]
    fn test_bad_token_rejected() {
        assert!(SplitDescriptor::from_token("***not base64***").is_err());
        assert!(SplitDescriptor::from_token("AAAA").is_err());
    }
}

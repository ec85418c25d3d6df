//! Split-token frame codec
//!
//! Frame layout:
//! - Payload Length (u32 LE)
//! - Checksum (u32 LE, CRC32 of the payload)
//! - Payload (serde_json bytes)
//!
//! The frame is self-contained and byte-stable, so a token produced in one
//! process decodes in another. Any length or checksum mismatch is corruption
//! and fatal.

use crc32fast::Hasher;
use thiserror::Error;

/// Frame header size: length + checksum
const HEADER_LEN: usize = 8;

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Frame decoding failures
#[derive(Debug, Clone, Error)]
pub enum CodecError {
    /// Frame shorter than its header or declared payload
    #[error("truncated frame: expected {expected} bytes, got {actual}")]
    Truncated { expected: usize, actual: usize },

    /// Payload checksum mismatch
    #[error("frame checksum mismatch: expected {expected:#010x}, computed {computed:#010x}")]
    ChecksumMismatch { expected: u32, computed: u32 },

    /// Payload did not parse as the expected structure
    #[error("malformed frame payload: {reason}")]
    Malformed { reason: String },

    /// Payload declared a wire version this build does not speak
    #[error("unsupported wire version {version}")]
    UnsupportedVersion { version: u32 },
}

/// Computes the CRC32 checksum of a payload
pub fn checksum(payload: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(payload);
    hasher.finalize()
}

/// Wraps a payload in a length + checksum frame
pub fn encode_frame(payload: &[u8]) -> Vec<u8> {
    let mut frame = Vec::with_capacity(HEADER_LEN + payload.len());
    frame.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    frame.extend_from_slice(&checksum(payload).to_le_bytes());
    frame.extend_from_slice(payload);
    frame
}

/// Unwraps a frame, verifying length and checksum
pub fn decode_frame(frame: &[u8]) -> CodecResult<&[u8]> {
    if frame.len() < HEADER_LEN {
        return Err(CodecError::Truncated {
            expected: HEADER_LEN,
            actual: frame.len(),
        });
    }

    let declared = u32::from_le_bytes([frame[0], frame[1], frame[2], frame[3]]) as usize;
    let expected = u32::from_le_bytes([frame[4], frame[5], frame[6], frame[7]]);

    if frame.len() != HEADER_LEN + declared {
        return Err(CodecError::Truncated {
            expected: HEADER_LEN + declared,
            actual: frame.len(),
        });
    }

    let payload = &frame[HEADER_LEN..];
    let computed = checksum(payload);
    if computed != expected {
        return Err(CodecError::ChecksumMismatch { expected, computed });
    }

    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let payload = br#"{"index":"logs"}"#;
        let frame = encode_frame(payload);
        assert_eq!(decode_frame(&frame).unwrap(), payload);
    }

    #[test]
    fn test_truncated_frame_rejected() {
        let frame = encode_frame(b"payload");
        let err = decode_frame(&frame[..frame.len() - 1]).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { .. }));

        let err = decode_frame(&frame[..4]).unwrap_err();
        assert!(matches!(err, CodecError::Truncated { .. }));
    }

    #[test]
    fn test_bit_flip_detected() {
        let mut frame = encode_frame(b"payload bytes");
        let last = frame.len() - 1;
        frame[last] ^= 0x01;
        let err = decode_frame(&frame).unwrap_err();
        assert!(matches!(err, CodecError::ChecksumMismatch { .. }));
    }

    #[test]
    fn test_empty_payload_frames() {
        let frame = encode_frame(&[]);
        assert_eq!(decode_frame(&frame).unwrap(), &[] as &[u8]);
    }
}

//! Centralized serialization and deserialization functions.
//!
//! Records are stored as JSON: the value format is self-describing, field
//! order never affects correctness, and a missing or mistyped field is a
//! reported decode error rather than a silently-zeroed record. All contract
//! modules go through this pair so decode failures surface uniformly.

use serde::{Serialize, de::DeserializeOwned};
use snafu::Snafu;

/// Error type for codec operations.
#[derive(Debug, Snafu)]
pub enum CodecError {
    /// Encoding failed.
    #[snafu(display("Encoding failed: {source}"))]
    Encode {
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// Decoding failed.
    #[snafu(display("Decoding failed: {source}"))]
    Decode {
        /// The underlying JSON error.
        source: serde_json::Error,
    },
}

/// Encodes a record to its stored byte representation.
///
/// Never fails for a well-formed record; the error path exists only for
/// types whose `Serialize` impl can reject values.
///
/// # Errors
///
/// Returns `CodecError::Encode` if serialization fails.
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, CodecError> {
    serde_json::to_vec(value).map_err(|source| CodecError::Encode { source })
}

/// Decodes stored bytes back into a record.
///
/// # Errors
///
/// Returns `CodecError::Decode` if the bytes do not match the expected
/// record shape (missing required field, wrong type, trailing garbage).
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    serde_json::from_slice(bytes).map_err(|source| CodecError::Decode { source })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{Status, Traceability};

    #[test]
    fn roundtrip_preserves_trail() {
        let mut trail = Traceability::begin("T1", "alice", "FarmSite");
        trail.push_step(Status::Collected, "Depot1", "bob");

        let bytes = encode(&trail).expect("encode trail");
        let back: Traceability = decode(&bytes).expect("decode trail");
        assert_eq!(back, trail);
    }

    #[test]
    fn field_order_is_irrelevant() {
        let bytes =
            br#"{"pic":["alice"],"location":["FarmSite"],"status":["harvested"],"id":"T1"}"#;
        let trail: Traceability = decode(bytes).expect("decode reordered fields");
        assert_eq!(trail.id, "T1");
        assert_eq!(trail.last_status(), Some(Status::Harvested));
    }

    #[test]
    fn missing_field_is_a_reported_error() {
        // No `status` field: must fail, never produce an empty trail.
        let bytes = br#"{"id":"T1","location":[],"pic":[]}"#;
        let result: Result<Traceability, _> = decode(bytes);
        let err = result.unwrap_err();
        assert!(matches!(err, CodecError::Decode { .. }));
        assert!(err.to_string().starts_with("Decoding failed:"));
    }

    #[test]
    fn wrong_type_is_a_reported_error() {
        let bytes = br#"{"id":"T1","status":"harvested","location":[],"pic":[]}"#;
        let result: Result<Traceability, _> = decode(bytes);
        assert!(matches!(result, Err(CodecError::Decode { .. })));
    }

    #[test]
    fn unknown_status_tag_is_rejected() {
        let bytes = br#"{"id":"T1","status":["vaporized"],"location":["x"],"pic":["y"]}"#;
        let result: Result<Traceability, _> = decode(bytes);
        assert!(result.is_err());
    }
}

//! Versioned document encoding between domain types and stored bytes.
//!
//! Every document is wrapped in an envelope:
//!
//! ```text
//! { schema_version: u32, body: <document> }
//! ```
//!
//! Decoding refuses documents written with a schema this build does not
//! understand. When the body itself fails to parse, the leading
//! `schema_version` is read on its own so a newer schema is reported as such
//! rather than as a codec error.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::error::{Result, StoreError};

/// Schema version written by this build.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a, T> {
    schema_version: u32,
    body: &'a T,
}

#[derive(Deserialize)]
struct Envelope<T> {
    schema_version: u32,
    body: T,
}

#[derive(Deserialize)]
struct Header {
    schema_version: u32,
}

/// Wire format for stored documents.
pub trait DocumentCodec: Send + Sync {
    fn to_bytes<T: Serialize>(&self, value: &T) -> Result<Vec<u8>>;

    fn from_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T>;

    /// Encode a document under the current schema version.
    fn encode<T: Serialize>(&self, document: &T) -> Result<Vec<u8>> {
        self.to_bytes(&EnvelopeRef {
            schema_version: SCHEMA_VERSION,
            body: document,
        })
    }

    /// Decode a document, rejecting unknown schema versions.
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        match self.from_bytes::<Envelope<T>>(bytes) {
            Ok(envelope) => {
                check_schema(envelope.schema_version)?;
                Ok(envelope.body)
            }
            Err(err) => {
                if let Ok(header) = self.from_bytes::<Header>(bytes) {
                    check_schema(header.schema_version)?;
                }
                Err(err)
            }
        }
    }
}

fn check_schema(found: u32) -> Result<()> {
    if found == SCHEMA_VERSION {
        Ok(())
    } else {
        Err(StoreError::UnsupportedSchema {
            found,
            supported: SCHEMA_VERSION,
        })
    }
}

/// Human-readable JSON documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonCodec;

impl DocumentCodec for JsonCodec {
    fn to_bytes<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| StoreError::Codec(e.to_string()))
    }

    fn from_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Codec(e.to_string()))
    }
}

/// Compact binary documents.
#[derive(Clone, Copy, Debug, Default)]
pub struct BincodeCodec;

impl DocumentCodec for BincodeCodec {
    fn to_bytes<T: Serialize>(&self, value: &T) -> Result<Vec<u8>> {
        bincode::serialize(value).map_err(|e| StoreError::Codec(e.to_string()))
    }

    fn from_bytes<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        bincode::deserialize(bytes).map_err(|e| StoreError::Codec(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::battle::{BattleRequest, BattleState, Player};
    use crate::cards::mock_pool;

    fn battle() -> BattleState {
        BattleState::new(
            "battle-1",
            Player::new("a", "Alpha", 3, mock_pool("a", 5).into_iter().collect()),
            Player::new("b", "Beta", 3, mock_pool("b", 5).into_iter().collect()),
        )
    }

    #[test]
    fn test_json_battle_document() {
        let state = battle();
        let bytes = JsonCodec.encode(&state).unwrap();

        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("\"schema_version\":1"));
        assert!(text.contains("\"currentPlayerId\""));

        let back: BattleState = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(back, state);
    }

    #[test]
    fn test_bincode_request_document() {
        let mut request = BattleRequest::new("a", "Alpha", "b", "Beta");
        request.accept("battle-1").unwrap();

        let bytes = BincodeCodec.encode(&request).unwrap();
        let back: BattleRequest = BincodeCodec.decode(&bytes).unwrap();
        assert_eq!(back, request);
    }

    #[test]
    fn test_unknown_schema_rejected() {
        let bytes = br#"{"schema_version": 2, "body": {}}"#;
        let err = JsonCodec.decode::<BattleState>(bytes).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedSchema { found: 2, supported: 1 }));
    }

    #[test]
    fn test_newer_schema_rejected_even_when_body_parses() {
        let mut bytes = BincodeCodec.encode(&battle()).unwrap();
        bytes[..4].copy_from_slice(&2u32.to_le_bytes());

        let err = BincodeCodec.decode::<BattleState>(&bytes).unwrap_err();
        assert!(matches!(err, StoreError::UnsupportedSchema { found: 2, supported: 1 }));
    }

    #[test]
    fn test_garbage_is_codec_error() {
        let err = JsonCodec.decode::<BattleState>(b"not json").unwrap_err();
        assert!(matches!(err, StoreError::Codec(_)));
    }
}

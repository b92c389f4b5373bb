//! Score submission bodies.
//!
//! Request:  `{ "address": "0x..", "delta": 5, "nonce": "..." }`
//! Response: `{ "ok": true, "txHash": "0x..", "blockNumber": 12 }`,
//!           `{ "ok": true, "skipped": true }`,
//!           `{ "ok": true, "duplicate": true }` or
//!           `{ "ok": false, "error": "..." }`.

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, decode_object};

/// Body posted by the browser when a session ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitRequest {
    pub address: String,
    pub delta: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<String>,
}

impl SubmitRequest {
    pub fn new(address: impl Into<String>, delta: u64, nonce: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            delta,
            nonce: Some(nonce.into()),
        }
    }

    pub fn encode(&self) -> Result<String, ProtocolError> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Body returned by the relay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub skipped: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub duplicate: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl SubmitResponse {
    pub fn confirmed(tx_hash: impl Into<String>, block_number: u64) -> Self {
        Self {
            ok: true,
            tx_hash: Some(tx_hash.into()),
            block_number: Some(block_number),
            ..Self::default()
        }
    }

    pub fn skipped() -> Self {
        Self {
            ok: true,
            skipped: true,
            ..Self::default()
        }
    }

    pub fn duplicate() -> Self {
        Self {
            ok: true,
            duplicate: true,
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// Decode a response body. Non-object bodies are rejected.
    pub fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        decode_object(body)
    }

    /// Classify the response.
    ///
    /// `skipped` and `duplicate` are checked before `ok`: both arrive with
    /// `ok: true` but must not be credited as a confirmed write.
    pub fn reply(&self) -> SubmitReply {
        if self.skipped {
            SubmitReply::Skipped
        } else if self.duplicate {
            SubmitReply::Duplicate
        } else if self.ok {
            SubmitReply::Confirmed {
                tx_hash: self.tx_hash.clone(),
                block_number: self.block_number,
            }
        } else {
            SubmitReply::Rejected(
                self.error
                    .clone()
                    .filter(|e| !e.is_empty())
                    .unwrap_or_else(|| "Submit failed".to_string()),
            )
        }
    }
}

/// What a relay response means for the submitting client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitReply {
    /// The write was confirmed on chain.
    Confirmed {
        tx_hash: Option<String>,
        block_number: Option<u64>,
    },
    /// The relay ignored a non-positive delta.
    Skipped,
    /// The nonce was already seen by the relay.
    Duplicate,
    /// The relay answered but did not perform the write.
    Rejected(String),
}

impl SubmitReply {
    /// Skips and duplicates are final answers; only rejections are retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, SubmitReply::Rejected(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_missing_nonce() {
        let req = SubmitRequest {
            address: "0xabc".to_string(),
            delta: 5,
            nonce: None,
        };
        assert_eq!(req.encode().unwrap(), r#"{"address":"0xabc","delta":5}"#);
    }

    #[test]
    fn test_confirmed_response_shape() {
        let json = serde_json::to_value(SubmitResponse::confirmed("0x01", 7)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "ok": true, "txHash": "0x01", "blockNumber": 7 })
        );
    }

    #[test]
    fn test_skipped_response_shape() {
        let json = serde_json::to_value(SubmitResponse::skipped()).unwrap();
        assert_eq!(json, serde_json::json!({ "ok": true, "skipped": true }));
    }

    #[test]
    fn test_skip_and_duplicate_take_precedence_over_ok() {
        let skipped = SubmitResponse::decode(br#"{"ok":true,"skipped":true}"#).unwrap();
        assert_eq!(skipped.reply(), SubmitReply::Skipped);
        let dup = SubmitResponse::decode(br#"{"ok":true,"duplicate":true}"#).unwrap();
        assert_eq!(dup.reply(), SubmitReply::Duplicate);
        assert!(!dup.reply().is_retryable());
    }

    #[test]
    fn test_error_without_message_falls_back() {
        let resp = SubmitResponse::decode(br#"{"ok":false}"#).unwrap();
        assert_eq!(resp.reply(), SubmitReply::Rejected("Submit failed".to_string()));
        assert!(resp.reply().is_retryable());
    }

    #[test]
    fn test_decode_rejects_non_object() {
        assert!(matches!(
            SubmitResponse::decode(b"[1,2]"),
            Err(ProtocolError::NotAnObject)
        ));
        assert!(matches!(
            SubmitResponse::decode(b"<html>"),
            Err(ProtocolError::Json(_))
        ));
    }
}

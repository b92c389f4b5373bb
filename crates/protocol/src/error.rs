//! Protocol error types.

use thiserror::Error;

/// Errors that can occur while encoding or decoding relay messages.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Response body is not an object")]
    NotAnObject,
}

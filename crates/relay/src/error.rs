//! Relay error types.

use axum::http::StatusCode;
use thiserror::Error;

/// Failure of the score ledger write.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    Rpc(String),

    #[error("Ledger state unavailable")]
    Unavailable,
}

/// Errors returned by the submit endpoint.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("Bad address")]
    BadAddress,

    #[error("Bad delta")]
    BadDelta,

    #[error("{0}")]
    Malformed(String),

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

impl RelayError {
    /// Input validation failures are the caller's fault; the rest is ours.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::BadAddress | RelayError::BadDelta => StatusCode::BAD_REQUEST,
            RelayError::Malformed(_) | RelayError::Ledger(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<serde_json::Error> for RelayError {
    fn from(e: serde_json::Error) -> Self {
        RelayError::Malformed(e.to_string())
    }
}

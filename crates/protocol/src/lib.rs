//! Shared protocol crate for Neon Dodge.
//!
//! This crate contains:
//! - The score submission request/response bodies exchanged with the relay
//! - The username lookup body returned by the identity service
//! - Classification of relay responses into submission outcomes

mod error;
mod lookup;
mod submit;

pub use error::ProtocolError;
pub use lookup::{UserRecord, UsernameLookup, lookup_url};
pub use submit::{SubmitReply, SubmitRequest, SubmitResponse};

/// Parse a JSON body, requiring the top-level value to be an object.
pub(crate) fn decode_object<T: serde::de::DeserializeOwned>(body: &[u8]) -> Result<T, ProtocolError> {
    let value: serde_json::Value = serde_json::from_slice(body)?;
    if !value.is_object() {
        return Err(ProtocolError::NotAnObject);
    }
    Ok(serde_json::from_value(value)?)
}

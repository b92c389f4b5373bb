//! Username lookup body.
//!
//! `GET <base>?wallet=<address>` answers
//! `{ "hasUsername": true, "user": { "username": "neo" } }`.

use serde::{Deserialize, Serialize};

use crate::{ProtocolError, decode_object};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsernameLookup {
    #[serde(default)]
    pub has_username: bool,
    #[serde(default)]
    pub user: Option<UserRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub username: Option<String>,
}

impl UsernameLookup {
    pub fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        decode_object(body)
    }

    /// The reserved username, if the service reports one.
    pub fn username(&self) -> Option<&str> {
        if !self.has_username {
            return None;
        }
        self.user
            .as_ref()
            .and_then(|u| u.username.as_deref())
            .filter(|name| !name.is_empty())
    }
}

/// Build the lookup URL for a wallet.
pub fn lookup_url(base: &str, wallet: &str) -> String {
    format!("{}?wallet={}", base, wallet)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_present() {
        let lookup =
            UsernameLookup::decode(br#"{"hasUsername":true,"user":{"username":"neo"}}"#).unwrap();
        assert_eq!(lookup.username(), Some("neo"));
    }

    #[test]
    fn test_username_requires_flag() {
        let lookup =
            UsernameLookup::decode(br#"{"hasUsername":false,"user":{"username":"neo"}}"#).unwrap();
        assert_eq!(lookup.username(), None);
        let empty = UsernameLookup::decode(br#"{"hasUsername":true}"#).unwrap();
        assert_eq!(empty.username(), None);
    }

    #[test]
    fn test_lookup_url() {
        assert_eq!(
            lookup_url("https://ids.example/api/check", "0xab"),
            "https://ids.example/api/check?wallet=0xab"
        );
    }
}

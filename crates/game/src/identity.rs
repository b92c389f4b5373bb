//! Wallet and username gate in front of score submission.
//!
//! Submission is only allowed once the player's wallet address is known
//! and a username has been reserved for it. The host drives the gate from
//! its wallet and lookup callbacks; the gate only tracks state.

use tracing::debug;

/// Username lookup poll interval while waiting for a reservation.
pub const USERNAME_POLL_INTERVAL_MS: u32 = 2500;

/// Tag appended to the reservation link.
const REFERRER: &str = "neon-dodge";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IdentityStatus {
    /// Nothing requested yet.
    #[default]
    Idle,
    /// Wallet or username lookup in flight.
    Loading,
    /// Wallet and username known; submissions allowed.
    Ready,
    /// Wallet known, no username reserved.
    NeedUsername,
    /// Polling the lookup until the player reserves a username.
    WaitingUsername,
}

#[derive(Debug, Clone, Default)]
pub struct IdentityGate {
    status: IdentityStatus,
    address: Option<String>,
    username: Option<String>,
}

impl IdentityGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> IdentityStatus {
        self.status
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn begin_loading(&mut self) {
        self.status = IdentityStatus::Loading;
    }

    /// A wallet was linked. The username is looked up next.
    pub fn wallet_linked(&mut self, address: impl Into<String>) {
        let address = address.into();
        if self.address.as_deref() != Some(address.as_str()) {
            self.username = None;
        }
        debug!("Wallet linked: {}", address);
        self.address = Some(address);
        self.status = IdentityStatus::Loading;
    }

    /// No wallet is linked. Clears everything.
    pub fn wallet_missing(&mut self) {
        self.address = None;
        self.username = None;
        self.status = IdentityStatus::Idle;
    }

    pub fn username_found(&mut self, username: impl Into<String>) {
        let username = username.into();
        if username.is_empty() {
            self.username_missing();
            return;
        }
        self.username = Some(username);
        self.status = if self.address.is_some() {
            IdentityStatus::Ready
        } else {
            IdentityStatus::Idle
        };
    }

    /// Lookup answered with no username. A running poll keeps waiting.
    pub fn username_missing(&mut self) {
        self.username = None;
        if self.status != IdentityStatus::WaitingUsername {
            self.status = if self.address.is_some() {
                IdentityStatus::NeedUsername
            } else {
                IdentityStatus::Idle
            };
        }
    }

    /// Enter the polling state. Returns `false` if already polling or if
    /// there is no wallet to poll for.
    pub fn start_waiting(&mut self) -> bool {
        if self.status == IdentityStatus::WaitingUsername || self.address.is_none() {
            return false;
        }
        self.status = IdentityStatus::WaitingUsername;
        true
    }

    /// Leave the polling state without an answer.
    pub fn stop_waiting(&mut self) {
        if self.status == IdentityStatus::WaitingUsername {
            self.status = IdentityStatus::NeedUsername;
        }
    }

    /// Both the address and the username are present.
    pub fn can_submit(&self) -> bool {
        self.address.is_some() && self.username.is_some()
    }
}

/// Reservation page link for `wallet`.
pub fn username_site_url(site: &str, wallet: &str) -> String {
    format!("{}?wallet={}&ref={}", site, wallet, REFERRER)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ADDR: &str = "0x1234567890abcdef1234567890abcdef12345678";

    #[test]
    fn test_happy_path() {
        let mut gate = IdentityGate::new();
        assert_eq!(gate.status(), IdentityStatus::Idle);
        gate.begin_loading();
        gate.wallet_linked(ADDR);
        assert!(!gate.can_submit());
        gate.username_found("neo");
        assert_eq!(gate.status(), IdentityStatus::Ready);
        assert!(gate.can_submit());
        assert_eq!(gate.username(), Some("neo"));
    }

    #[test]
    fn test_waiting_for_username() {
        let mut gate = IdentityGate::new();
        gate.wallet_linked(ADDR);
        gate.username_missing();
        assert_eq!(gate.status(), IdentityStatus::NeedUsername);

        assert!(gate.start_waiting());
        assert!(!gate.start_waiting());

        // Polls that come back empty keep the gate waiting.
        gate.username_missing();
        assert_eq!(gate.status(), IdentityStatus::WaitingUsername);

        gate.username_found("trinity");
        assert_eq!(gate.status(), IdentityStatus::Ready);
    }

    #[test]
    fn test_no_wallet_cannot_wait_or_submit() {
        let mut gate = IdentityGate::new();
        assert!(!gate.start_waiting());
        gate.username_found("ghost");
        assert!(!gate.can_submit());
        assert_eq!(gate.status(), IdentityStatus::Idle);
    }

    #[test]
    fn test_wallet_change_drops_username() {
        let mut gate = IdentityGate::new();
        gate.wallet_linked(ADDR);
        gate.username_found("neo");
        gate.wallet_linked("0xfeed");
        assert!(!gate.can_submit());
        gate.wallet_missing();
        assert_eq!(gate.address(), None);
    }

    #[test]
    fn test_site_url() {
        assert_eq!(
            username_site_url("https://names.example/reserve", "0xabc"),
            "https://names.example/reserve?wallet=0xabc&ref=neon-dodge"
        );
    }
}

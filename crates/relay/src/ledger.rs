//! Score ledger collaborator.
//!
//! The relay holds exactly one ledger binding for its lifetime and shares
//! it between all requests. Writes are not serialized by the relay.

use crate::error::LedgerError;
use futures_util::future::BoxFuture;
use rand::Rng;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Confirmed ledger write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxReceipt {
    pub tx_hash: String,
    pub block_number: u64,
}

/// Contract method crediting a player.
pub trait ScoreLedger: Send + Sync {
    /// Credit `score` to `player` and wait for confirmation. `amount` is
    /// reserved and always 0 for this game.
    fn update_player_data<'a>(
        &'a self,
        player: &'a str,
        score: u64,
        amount: u64,
    ) -> BoxFuture<'a, Result<TxReceipt, LedgerError>>;
}

/// Process-local ledger.
///
/// Confirms every write immediately with a fresh random transaction hash
/// and a monotonically increasing block number.
#[derive(Debug)]
pub struct MemoryLedger {
    block: AtomicU64,
    writes: Mutex<Vec<(String, u64, u64)>>,
    fail_with: Mutex<Option<String>>,
}

impl Default for MemoryLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryLedger {
    pub fn new() -> Self {
        Self {
            block: AtomicU64::new(1),
            writes: Mutex::new(Vec::new()),
            fail_with: Mutex::new(None),
        }
    }

    /// Every write so far as `(player, score, amount)`.
    pub fn writes(&self) -> Vec<(String, u64, u64)> {
        self.writes.lock().map(|w| w.clone()).unwrap_or_default()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().map(|w| w.len()).unwrap_or_default()
    }

    /// Make subsequent writes fail with `message` (`None` to recover).
    pub fn set_failure(&self, message: Option<&str>) {
        if let Ok(mut fail) = self.fail_with.lock() {
            *fail = message.map(str::to_string);
        }
    }

    fn write(&self, player: &str, score: u64, amount: u64) -> Result<TxReceipt, LedgerError> {
        if let Some(message) = self.fail_with.lock().ok().and_then(|f| f.clone()) {
            return Err(LedgerError::Rpc(message));
        }
        self.writes
            .lock()
            .map_err(|_| LedgerError::Unavailable)?
            .push((player.to_string(), score, amount));

        let block_number = self.block.fetch_add(1, Ordering::Relaxed);
        let tx_hash = random_tx_hash();
        info!("Credited {} to {} in block {} ({})", score, player, block_number, tx_hash);
        Ok(TxReceipt { tx_hash, block_number })
    }
}

impl ScoreLedger for MemoryLedger {
    fn update_player_data<'a>(
        &'a self,
        player: &'a str,
        score: u64,
        amount: u64,
    ) -> BoxFuture<'a, Result<TxReceipt, LedgerError>> {
        Box::pin(async move { self.write(player, score, amount) })
    }
}

/// `0x` followed by 64 lowercase hex digits.
fn random_tx_hash() -> String {
    let bytes: [u8; 32] = rand::rng().random();
    let mut hash = String::with_capacity(66);
    hash.push_str("0x");
    for b in bytes {
        hash.push_str(&format!("{:02x}", b));
    }
    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_ledger_confirms() {
        let ledger = MemoryLedger::new();
        let first = ledger.update_player_data("0xabc", 5, 0).await.unwrap();
        let second = ledger.update_player_data("0xabc", 2, 0).await.unwrap();
        assert_eq!(first.tx_hash.len(), 66);
        assert!(first.tx_hash.starts_with("0x"));
        assert!(first.tx_hash[2..].chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first.tx_hash, second.tx_hash);
        assert_eq!(second.block_number, first.block_number + 1);
        assert_eq!(ledger.writes(), vec![("0xabc".into(), 5, 0), ("0xabc".into(), 2, 0)]);
    }

    #[tokio::test]
    async fn test_memory_ledger_failure() {
        let ledger = MemoryLedger::new();
        ledger.set_failure(Some("insufficient funds"));
        let err = ledger.update_player_data("0xabc", 5, 0).await.unwrap_err();
        assert_eq!(err.to_string(), "insufficient funds");
        assert_eq!(ledger.write_count(), 0);
    }
}

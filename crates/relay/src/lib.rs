//! Neon Dodge score relay library.

pub mod config;
pub mod error;
pub mod ledger;
pub mod nonce;
pub mod routes;
pub mod service;

// Re-export commonly used types
pub use config::Config;
pub use error::{LedgerError, RelayError};
pub use ledger::{MemoryLedger, ScoreLedger, TxReceipt};
pub use nonce::{NonceCache, spawn_sweeper};
pub use routes::router;
pub use service::Relay;

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Build the relay for `config` and start its nonce sweeper.
pub fn start(config: &Config) -> (Relay, JoinHandle<()>) {
    let relay = Relay::from_config(config);
    let every = Duration::from_secs(config.replay.sweep_interval_secs.max(1));
    let sweeper = spawn_sweeper(Arc::clone(relay.nonces()), every);
    (relay, sweeper)
}

//! The submit operation.

use crate::config::Config;
use crate::error::RelayError;
use crate::ledger::{MemoryLedger, ScoreLedger};
use crate::nonce::NonceCache;
use protocol::SubmitResponse;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Reserved second argument of the ledger call.
const RESERVED_AMOUNT: u64 = 0;

/// Shared relay state: one ledger binding and one replay cache.
#[derive(Clone)]
pub struct Relay {
    ledger: Arc<dyn ScoreLedger>,
    nonces: Arc<NonceCache>,
}

impl Relay {
    pub fn new(ledger: Arc<dyn ScoreLedger>, nonces: Arc<NonceCache>) -> Self {
        Self { ledger, nonces }
    }

    /// Build the relay described by `config` on top of the in-process ledger.
    pub fn from_config(config: &Config) -> Self {
        if std::env::var(&config.ledger.signer_key_env).is_err() {
            warn!(
                "{} is not set; scores are credited to the in-memory ledger only",
                config.ledger.signer_key_env
            );
        }
        info!(
            "Ledger: in-memory (contract {:?} at {:?}), nonce TTL {}s",
            config.ledger.contract, config.ledger.rpc_url, config.replay.ttl_secs
        );
        Self::new(
            Arc::new(MemoryLedger::new()),
            Arc::new(NonceCache::new(Duration::from_secs(config.replay.ttl_secs))),
        )
    }

    pub fn nonces(&self) -> &Arc<NonceCache> {
        &self.nonces
    }

    /// Handle one raw request body.
    ///
    /// Order: validate, skip non-positive deltas, claim the nonce, write.
    /// The nonce stays claimed even if the write fails.
    pub async fn submit(&self, body: &[u8]) -> Result<SubmitResponse, RelayError> {
        let value: Value = serde_json::from_slice(body)?;

        let address = match value.get("address").and_then(Value::as_str) {
            Some(address) if !address.is_empty() => address,
            _ => return Err(RelayError::BadAddress),
        };
        let delta = match value.get("delta").and_then(Value::as_f64) {
            Some(delta) if delta.is_finite() => delta,
            _ => return Err(RelayError::BadDelta),
        };
        if delta <= 0.0 {
            debug!("Skipping non-positive delta {} for {}", delta, address);
            return Ok(SubmitResponse::skipped());
        }
        // The ledger takes whole points only.
        if delta.fract() != 0.0 || delta > u64::MAX as f64 {
            return Err(RelayError::Malformed(format!("Cannot convert {} to an integer", delta)));
        }
        let score = delta as u64;

        let nonce = match value.get("nonce").and_then(Value::as_str) {
            Some(nonce) if !nonce.is_empty() => nonce.to_string(),
            _ => uuid::Uuid::new_v4().to_string(),
        };
        if !self.nonces.try_claim(&nonce) {
            info!("Duplicate nonce {} from {}", nonce, address);
            return Ok(SubmitResponse::duplicate());
        }

        let receipt = self
            .ledger
            .update_player_data(address, score, RESERVED_AMOUNT)
            .await?;
        info!(
            "Submitted +{} for {} (nonce {}, tx {})",
            score, address, nonce, receipt.tx_hash
        );
        Ok(SubmitResponse::confirmed(receipt.tx_hash, receipt.block_number))
    }
}

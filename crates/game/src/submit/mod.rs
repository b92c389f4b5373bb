//! Score submission pipeline.
//!
//! A finished session's score is posted to the relay at most once per
//! completion event. Transient failures are retried with exponential
//! backoff; every retry reuses the nonce of the first attempt so the relay
//! can recognize a replay. Skipped and duplicate answers are final.

mod dashboard;

pub use dashboard::{Dashboard, EXPLORER_TX_URL, short_tx};

use crate::identity::IdentityGate;
use protocol::{ProtocolError, SubmitReply, SubmitRequest, SubmitResponse};
use std::future::Future;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised by a [`Transport`] before a relay answer is available.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("{0}")]
    Network(String),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

/// Posts one submission to the relay.
pub trait Transport {
    fn submit(&self, request: &SubmitRequest) -> impl Future<Output = Result<SubmitResponse, TransportError>>;
}

/// Waits between attempts.
pub trait Sleeper {
    fn sleep(&self, ms: u32) -> impl Future<Output = ()>;
}

/// Retry budget for one completion event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first.
    pub max_attempts: u32,
    pub base_delay_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 420,
        }
    }
}

impl RetryPolicy {
    /// Delay before the next attempt once `failures` attempts have failed.
    #[inline]
    pub fn delay_after(&self, failures: u32) -> u32 {
        self.base_delay_ms.saturating_mul(1u32 << failures.min(16))
    }
}

/// Why a score never reached the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalSkip {
    /// Wallet address or username is missing.
    NoIdentity,
    /// Nothing was scored.
    NothingScored,
}

/// Final result of one completion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Confirmed {
        delta: u64,
        tx_hash: Option<String>,
        block_number: Option<u64>,
    },
    Skipped,
    Duplicate,
    /// Retries exhausted.
    Failed { last_error: String, attempts: u32 },
    NotSubmitted(LocalSkip),
}

impl SubmitOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, SubmitOutcome::Confirmed { .. })
    }
}

/// Check the local preconditions and return the address to submit for.
pub fn prepare(gate: &IdentityGate, delta: u64) -> Result<String, LocalSkip> {
    let address = match (gate.address(), gate.can_submit()) {
        (Some(address), true) => address.to_string(),
        _ => return Err(LocalSkip::NoIdentity),
    };
    if delta == 0 {
        return Err(LocalSkip::NothingScored);
    }
    Ok(address)
}

/// Fresh nonce for one completion event.
pub fn new_nonce() -> String {
    uuid::Uuid::new_v4().to_string()
}

pub struct SubmitPipeline<T, S> {
    transport: T,
    sleeper: S,
    policy: RetryPolicy,
}

impl<T: Transport, S: Sleeper> SubmitPipeline<T, S> {
    pub fn new(transport: T, sleeper: S) -> Self {
        Self {
            transport,
            sleeper,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> RetryPolicy {
        self.policy
    }

    /// Gate on identity and score, then submit.
    pub async fn run(&self, gate: &IdentityGate, delta: u64, nonce: Option<String>) -> SubmitOutcome {
        match prepare(gate, delta) {
            Ok(address) => self.submit(&address, delta, nonce).await,
            Err(skip) => SubmitOutcome::NotSubmitted(skip),
        }
    }

    /// Submit `delta` for `address`, retrying transient failures.
    ///
    /// A missing or empty `nonce` is replaced by a fresh one. All attempts
    /// of this call carry the same nonce.
    pub async fn submit(&self, address: &str, delta: u64, nonce: Option<String>) -> SubmitOutcome {
        if delta == 0 {
            return SubmitOutcome::NotSubmitted(LocalSkip::NothingScored);
        }
        let nonce = nonce.filter(|n| !n.is_empty()).unwrap_or_else(new_nonce);
        let request = SubmitRequest::new(address, delta, nonce);

        let mut last_error = String::new();
        let mut attempts = 0;
        while attempts < self.policy.max_attempts {
            attempts += 1;
            match self.transport.submit(&request).await {
                Ok(response) => match response.reply() {
                    SubmitReply::Confirmed { tx_hash, block_number } => {
                        info!("Score +{} confirmed after {} attempt(s)", delta, attempts);
                        return SubmitOutcome::Confirmed {
                            delta,
                            tx_hash,
                            block_number,
                        };
                    }
                    SubmitReply::Skipped => return SubmitOutcome::Skipped,
                    SubmitReply::Duplicate => return SubmitOutcome::Duplicate,
                    SubmitReply::Rejected(error) => last_error = error,
                },
                Err(e) => {
                    last_error = e.to_string();
                    if last_error.is_empty() {
                        last_error = "Network error".to_string();
                    }
                }
            }

            if attempts < self.policy.max_attempts {
                let delay = self.policy.delay_after(attempts);
                warn!("Submit attempt {} failed ({}), retrying in {}ms", attempts, last_error, delay);
                self.sleeper.sleep(delay).await;
            }
        }

        warn!("Giving up on score +{} after {} attempts: {}", delta, attempts, last_error);
        SubmitOutcome::Failed { last_error, attempts }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;

    /// Replays a fixed script of answers and records every request.
    #[derive(Default)]
    struct Scripted {
        script: RefCell<VecDeque<Result<SubmitResponse, TransportError>>>,
        seen: RefCell<Vec<SubmitRequest>>,
    }

    impl Scripted {
        fn new(script: Vec<Result<SubmitResponse, TransportError>>) -> Self {
            Self {
                script: RefCell::new(script.into()),
                seen: RefCell::default(),
            }
        }
    }

    impl Transport for &Scripted {
        async fn submit(&self, request: &SubmitRequest) -> Result<SubmitResponse, TransportError> {
            self.seen.borrow_mut().push(request.clone());
            self.script
                .borrow_mut()
                .pop_front()
                .unwrap_or_else(|| Err(TransportError::Network("script exhausted".into())))
        }
    }

    #[derive(Default)]
    struct Recorded {
        delays: RefCell<Vec<u32>>,
    }

    impl Sleeper for &Recorded {
        async fn sleep(&self, ms: u32) {
            self.delays.borrow_mut().push(ms);
        }
    }

    fn ready_gate() -> IdentityGate {
        let mut gate = IdentityGate::new();
        gate.wallet_linked("0xabc");
        gate.username_found("neo");
        gate
    }

    fn net(msg: &str) -> Result<SubmitResponse, TransportError> {
        Err(TransportError::Network(msg.to_string()))
    }

    #[tokio::test]
    async fn test_confirmed_first_try() {
        let transport = Scripted::new(vec![Ok(SubmitResponse::confirmed("0xfeed", 7))]);
        let sleeper = Recorded::default();
        let pipeline = SubmitPipeline::new(&transport, &sleeper);

        let outcome = pipeline.run(&ready_gate(), 5, None).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Confirmed {
                delta: 5,
                tx_hash: Some("0xfeed".into()),
                block_number: Some(7),
            }
        );
        let seen = transport.seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].address, "0xabc");
        assert!(seen[0].nonce.as_deref().is_some_and(|n| !n.is_empty()));
        assert!(sleeper.delays.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_three_failures_then_give_up() {
        let transport = Scripted::new(vec![
            net("offline"),
            Ok(SubmitResponse::error("rpc down")),
            net("timeout"),
            Ok(SubmitResponse::confirmed("0xlate", 1)),
        ]);
        let sleeper = Recorded::default();
        let pipeline = SubmitPipeline::new(&transport, &sleeper);

        let outcome = pipeline.run(&ready_gate(), 4, None).await;
        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                last_error: "timeout".into(),
                attempts: 3,
            }
        );
        assert_eq!(*sleeper.delays.borrow(), vec![840, 1680]);

        // Every retry carries the nonce of the first attempt.
        let seen = transport.seen.borrow();
        assert_eq!(seen.len(), 3);
        assert!(seen.iter().all(|r| r.nonce == seen[0].nonce));
    }

    #[tokio::test]
    async fn test_retry_then_confirm() {
        let transport = Scripted::new(vec![net("offline"), Ok(SubmitResponse::confirmed("0x01", 2))]);
        let sleeper = Recorded::default();
        let pipeline = SubmitPipeline::new(&transport, &sleeper);
        let outcome = pipeline.submit("0xabc", 3, Some("n-1".into())).await;
        assert!(outcome.is_confirmed());
        assert_eq!(*sleeper.delays.borrow(), vec![840]);
        assert_eq!(transport.seen.borrow()[1].nonce.as_deref(), Some("n-1"));
    }

    #[tokio::test]
    async fn test_skipped_and_duplicate_are_final() {
        for (answer, expected) in [
            (SubmitResponse::skipped(), SubmitOutcome::Skipped),
            (SubmitResponse::duplicate(), SubmitOutcome::Duplicate),
        ] {
            let transport = Scripted::new(vec![Ok(answer), Ok(SubmitResponse::confirmed("0x02", 3))]);
            let sleeper = Recorded::default();
            let pipeline = SubmitPipeline::new(&transport, &sleeper);
            assert_eq!(pipeline.run(&ready_gate(), 2, None).await, expected);
            assert_eq!(transport.seen.borrow().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_local_skips_make_no_request() {
        let transport = Scripted::new(vec![]);
        let sleeper = Recorded::default();
        let pipeline = SubmitPipeline::new(&transport, &sleeper);

        assert_eq!(
            pipeline.run(&ready_gate(), 0, None).await,
            SubmitOutcome::NotSubmitted(LocalSkip::NothingScored)
        );
        let mut no_name = IdentityGate::new();
        no_name.wallet_linked("0xabc");
        assert_eq!(
            pipeline.run(&no_name, 9, None).await,
            SubmitOutcome::NotSubmitted(LocalSkip::NoIdentity)
        );
        assert!(transport.seen.borrow().is_empty());
    }

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), 840);
        assert_eq!(policy.delay_after(2), 1680);
        assert_eq!(policy.delay_after(40), 420 * 65536);
    }
}

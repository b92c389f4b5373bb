//! Replay guard.
//!
//! Remembers recently claimed submission nonces for a fixed TTL. The cache
//! lives in process memory only: it is lost on restart and is not shared
//! between relay instances.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug)]
pub struct NonceCache {
    ttl: Duration,
    /// Nonce -> expiry deadline.
    seen: Mutex<HashMap<String, Instant>>,
}

impl NonceCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            seen: Mutex::new(HashMap::new()),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Instant>> {
        // The map stays consistent even if a holder panicked.
        self.seen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Claim `nonce`. Returns `false` if it was already claimed and has not
    /// expired. Check and insert happen under one lock.
    pub fn try_claim(&self, nonce: &str) -> bool {
        let now = Instant::now();
        let mut seen = self.lock();
        match seen.get(nonce) {
            Some(deadline) if *deadline > now => false,
            _ => {
                seen.insert(nonce.to_string(), now + self.ttl);
                true
            }
        }
    }

    /// Whether `nonce` is currently claimed.
    pub fn contains(&self, nonce: &str) -> bool {
        self.lock().get(nonce).is_some_and(|deadline| *deadline > Instant::now())
    }

    /// Drop expired entries. Returns the number removed.
    pub fn sweep(&self) -> usize {
        let now = Instant::now();
        let mut seen = self.lock();
        let before = seen.len();
        seen.retain(|_, deadline| *deadline > now);
        before - seen.len()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Periodically purge expired nonces.
pub fn spawn_sweeper(cache: Arc<NonceCache>, every: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(every);
        loop {
            interval.tick().await;
            let removed = cache.sweep();
            if removed > 0 {
                debug!("Purged {} expired nonces ({} live)", removed, cache.len());
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TTL: Duration = Duration::from_secs(300);

    #[tokio::test(start_paused = true)]
    async fn test_claim_once_within_ttl() {
        let cache = NonceCache::new(TTL);
        assert!(cache.try_claim("abc"));
        assert!(!cache.try_claim("abc"));
        assert!(cache.try_claim("def"));
        assert!(cache.contains("abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_expiry() {
        let cache = NonceCache::new(TTL);
        assert!(cache.try_claim("abc"));

        tokio::time::advance(Duration::from_secs(299)).await;
        assert!(!cache.try_claim("abc"));

        tokio::time::advance(Duration::from_secs(2)).await;
        assert!(!cache.contains("abc"));
        assert!(cache.try_claim("abc"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_purges_expired() {
        let cache = Arc::new(NonceCache::new(Duration::from_secs(10)));
        cache.try_claim("a");
        cache.try_claim("b");
        let handle = spawn_sweeper(Arc::clone(&cache), Duration::from_secs(5));

        tokio::time::sleep(Duration::from_secs(16)).await;
        assert!(cache.is_empty());
        handle.abort();
    }
}

//! Per-key computation guard.

use crate::cache::types::CacheKey;
use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Serializes computations per cache key.
///
/// At most one computation per key is in flight: concurrent requests for
/// the same key queue on the key's lock and, once admitted, find the
/// winner's result already cached. Distinct keys never contend.
///
/// Cancelling a waiting or computing request only drops its guard (or its
/// place in the queue); the key is never poisoned for other waiters.
#[derive(Default)]
pub struct Singleflight {
    keys: DashMap<CacheKey, Arc<Mutex<()>>>,
}

impl Singleflight {
    /// Creates an empty guard table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquires the computation guard for `key`, waiting for any in-flight
    /// computation of the same key to finish first.
    pub async fn acquire(&self, key: &CacheKey) -> OwnedMutexGuard<()> {
        let lock = self
            .keys
            .entry(key.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    /// Drops guard entries no caller currently holds or awaits.
    ///
    /// Keeps the table bounded by the set of keys actively in flight
    /// rather than every key ever requested. Returns the number removed.
    pub fn prune(&self) -> usize {
        let before = self.keys.len();
        self.keys.retain(|_, lock| Arc::strong_count(lock) > 1);
        before - self.keys.len()
    }

    /// Number of tracked keys.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when no keys are tracked.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::astro::CalculationMethod;
    use crate::coord::Coordinate;
    use crate::madhab::Madhab;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn key(day: u32) -> CacheKey {
        CacheKey::new(
            Coordinate::new(34.6401, 50.8764).unwrap().bucket(),
            NaiveDate::from_ymd_opt(2024, 3, day).unwrap(),
            CalculationMethod::MuslimWorldLeague,
            Madhab::Jafari,
            false,
        )
    }

    #[tokio::test]
    async fn test_same_key_serializes() {
        let flight = Arc::new(Singleflight::new());
        let concurrent = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let flight = flight.clone();
            let concurrent = concurrent.clone();
            let peak = peak.clone();
            handles.push(tokio::spawn(async move {
                let _guard = flight.acquire(&key(15)).await;
                let now = concurrent.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                concurrent.fetch_sub(1, Ordering::SeqCst);
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1, "same key must serialize");
    }

    #[tokio::test]
    async fn test_distinct_keys_run_concurrently() {
        let flight = Arc::new(Singleflight::new());

        let a = flight.acquire(&key(15)).await;
        // A second key must not block behind the first guard.
        let acquired = tokio::time::timeout(Duration::from_millis(100), flight.acquire(&key(16)))
            .await
            .expect("distinct key should acquire immediately");
        drop(acquired);
        drop(a);
    }

    #[tokio::test]
    async fn test_prune_keeps_held_guards() {
        let flight = Singleflight::new();

        let guard = flight.acquire(&key(15)).await;
        let _ = flight.acquire(&key(16)).await; // released immediately

        assert_eq!(flight.len(), 2);
        let removed = flight.prune();
        assert_eq!(removed, 1);
        assert_eq!(flight.len(), 1);
        drop(guard);

        flight.prune();
        assert!(flight.is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_waiter_does_not_poison_key() {
        let flight = Arc::new(Singleflight::new());

        let guard = flight.acquire(&key(15)).await;

        // A waiter that gets dropped mid-wait.
        let waiter = {
            let flight = flight.clone();
            tokio::spawn(async move {
                let _guard = flight.acquire(&key(15)).await;
            })
        };
        tokio::task::yield_now().await;
        waiter.abort();
        let _ = waiter.await;

        drop(guard);

        // The key must still be acquirable.
        let reacquired =
            tokio::time::timeout(Duration::from_millis(100), flight.acquire(&key(15))).await;
        assert!(reacquired.is_ok());
    }
}

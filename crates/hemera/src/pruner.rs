//! Background pruning for [`TtlCache`].

use crate::cache::TtlCache;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Spawn a task that prunes `cache` every `every`. Must be called from
/// within a tokio runtime. Abort the handle to stop it.
pub fn spawn_pruner<T>(cache: Arc<TtlCache<T>>, every: Duration) -> JoinHandle<()>
where
    T: Clone + Send + 'static,
{
    // tokio::time::interval rejects a zero period.
    let every = every.max(Duration::from_millis(1));
    log::info!("Starting cache pruner every {:?}", every);

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let removed = cache.prune();
            if removed > 0 {
                log::debug!("Pruner removed {} expired entries", removed);
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_pruner_removes_expired_entries() {
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
        ));
        let cache = Arc::new(TtlCache::new(clock.clone()));
        cache.set("short", 1u32, chrono::Duration::seconds(1));
        cache.set("long", 2u32, chrono::Duration::seconds(60));
        clock.advance(chrono::Duration::seconds(5));

        let handle = spawn_pruner(cache.clone(), Duration::from_millis(10));
        for _ in 0..100 {
            if !cache.contains_key("short") {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        handle.abort();

        assert!(!cache.contains_key("short"));
        assert!(cache.contains_key("long"));
    }
}

//! Cached position snapshots for all seven planets.

use crate::cache::TtlCache;
use crate::clock::Clock;
use crate::ephemeris::EphemerisProvider;
use crate::error::HemeraError;
use crate::planet::PlanetId;
use crate::resolver::resolve_longitude;
use crate::retrograde::retrograde_state;
use crate::snapshot::{canonical_timestamp, PlanetPosition, PositionSnapshot};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use std::sync::Arc;

/// Cache key for requests without an explicit instant.
pub const NOW_KEY: &str = "now";

/// How long snapshots stay cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    /// TTL for "now" requests; time moves on, so this is short.
    pub now_ttl: Duration,
    /// TTL for fixed-instant requests, whose answer never changes.
    pub fixed_ttl: Duration,
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self {
            now_ttl: Duration::seconds(30),
            fixed_ttl: Duration::days(7),
        }
    }
}

pub struct PositionService<P> {
    provider: P,
    cache: Arc<TtlCache<PositionSnapshot>>,
    clock: Arc<dyn Clock>,
    policy: CachePolicy,
}

impl<P: EphemerisProvider> PositionService<P> {
    /// Service with its own cache on `clock` and the default policy.
    pub fn new(provider: P, clock: Arc<dyn Clock>) -> Self {
        let cache = Arc::new(TtlCache::new(clock.clone()));
        Self::with_cache(provider, cache, clock, CachePolicy::default())
    }

    pub fn with_cache(
        provider: P,
        cache: Arc<TtlCache<PositionSnapshot>>,
        clock: Arc<dyn Clock>,
        policy: CachePolicy,
    ) -> Self {
        Self {
            provider,
            cache,
            clock,
            policy,
        }
    }

    pub fn with_policy(mut self, policy: CachePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn cache(&self) -> &Arc<TtlCache<PositionSnapshot>> {
        &self.cache
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Positions at `at`, or at the current instant when `at` is `None`.
    ///
    /// Cache hits are returned as stored. On a miss all seven planets are
    /// computed; if any one fails, nothing is cached and the error is
    /// returned.
    pub fn get_positions(&self, at: Option<DateTime<Utc>>) -> Result<PositionSnapshot, HemeraError> {
        let pruned = self.cache.prune();
        if pruned > 0 {
            log::debug!("Pruned {} expired position snapshots", pruned);
        }

        let (key, ttl, instant) = match at {
            None => (NOW_KEY.to_string(), self.policy.now_ttl, self.clock.now()),
            Some(t) => {
                let t = t.trunc_subsecs(3);
                (canonical_timestamp(t), self.policy.fixed_ttl, t)
            }
        };

        if let Some(hit) = self.cache.get(&key) {
            log::debug!("Position cache hit for '{}'", key);
            return Ok(hit);
        }

        log::debug!("Position cache miss for '{}', computing", key);
        let snapshot = self.compute_snapshot(instant)?;
        self.cache.set(key, snapshot.clone(), ttl);
        Ok(snapshot)
    }

    /// Uncached computation of all seven positions.
    pub fn compute_snapshot(&self, at: DateTime<Utc>) -> Result<PositionSnapshot, HemeraError> {
        let at = at.trunc_subsecs(3);
        let positions = PlanetId::ALL
            .iter()
            .map(|&planet| self.compute_position(planet, at))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(PositionSnapshot {
            timestamp_utc: at,
            positions,
        })
    }

    fn compute_position(&self, planet: PlanetId, at: DateTime<Utc>) -> Result<PlanetPosition, HemeraError> {
        let longitude = resolve_longitude(&self.provider, planet, at)?;
        let retrograde = retrograde_state(&self.provider, planet, at, longitude)?;
        PlanetPosition::new(planet, longitude, retrograde)
    }
}

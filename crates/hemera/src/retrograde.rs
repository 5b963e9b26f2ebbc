//! Apparent retrograde detection by one-hour forward difference.

use crate::angle::normalize_delta_180;
use crate::ephemeris::EphemerisProvider;
use crate::error::HemeraError;
use crate::planet::PlanetId;
use crate::resolver::resolve_longitude;
use chrono::{DateTime, Duration, Utc};

/// Sampling step for the forward difference.
pub fn sample_step() -> Duration {
    Duration::hours(1)
}

/// True when the body's longitude decreases over the next hour.
///
/// Does not special-case Sun and Moon; use [`retrograde_state`] for that.
pub fn is_retrograde<P>(
    provider: &P,
    planet: PlanetId,
    at: DateTime<Utc>,
) -> Result<bool, HemeraError>
where
    P: EphemerisProvider + ?Sized,
{
    let lon_at = resolve_longitude(provider, planet, at)?;
    moving_backwards(provider, planet, at, lon_at)
}

/// Same test as [`is_retrograde`] when the longitude at `at` is already
/// known; only the later sample is resolved.
pub fn moving_backwards<P>(
    provider: &P,
    planet: PlanetId,
    at: DateTime<Utc>,
    lon_at: f64,
) -> Result<bool, HemeraError>
where
    P: EphemerisProvider + ?Sized,
{
    let lon_later = resolve_longitude(provider, planet, at + sample_step())?;
    Ok(normalize_delta_180(lon_later - lon_at)? < 0.0)
}

/// Retrograde flag as reported in positions, given the longitude `lon_at`
/// already resolved for `at`. Always `false` for Sun and Moon, which are
/// never sampled.
pub fn retrograde_state<P>(
    provider: &P,
    planet: PlanetId,
    at: DateTime<Utc>,
    lon_at: f64,
) -> Result<bool, HemeraError>
where
    P: EphemerisProvider + ?Sized,
{
    if !planet.can_retrograde() {
        return Ok(false);
    }
    moving_backwards(provider, planet, at, lon_at)
}

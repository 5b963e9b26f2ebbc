//! Per-body geocentric ecliptic longitude.

use crate::ephemeris::frames::j2000_equatorial_to_true_ecliptic_longitude;
use crate::ephemeris::{julian_day, EphemerisError, EphemerisProvider};
use crate::error::HemeraError;
use crate::planet::PlanetId;
use chrono::{DateTime, Utc};

/// Geocentric ecliptic longitude of `planet` at `at`, in degrees.
///
/// The value is not normalized; pass it through
/// [`crate::angle::normalize_angle_360`] before exposing it.
pub fn resolve_longitude<P>(
    provider: &P,
    planet: PlanetId,
    at: DateTime<Utc>,
) -> Result<f64, HemeraError>
where
    P: EphemerisProvider + ?Sized,
{
    let jd = julian_day(at);
    let lon = match planet {
        PlanetId::Sun => provider.apparent_sun_longitude(jd)?,
        PlanetId::Moon => provider.geocentric_moon_longitude(jd)?,
        PlanetId::Mercury
        | PlanetId::Venus
        | PlanetId::Mars
        | PlanetId::Jupiter
        | PlanetId::Saturn => {
            let v = provider.equatorial_j2000_vector(planet, jd)?;
            j2000_equatorial_to_true_ecliptic_longitude(&v, jd)
                .ok_or(EphemerisError::DegenerateVector { planet, jd })?
        }
    };
    Ok(lon)
}

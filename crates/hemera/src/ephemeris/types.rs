use crate::error::HemeraError;
use crate::planet::PlanetId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Julian day of the Unix epoch, 1970-01-01T00:00:00Z.
const UNIX_EPOCH_JD: f64 = 2_440_587.5;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Errors raised by an ephemeris provider
#[derive(Error, Debug)]
pub enum EphemerisError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Julian day {jd} is outside the supported range {min}..{max}")]
    OutOfRange { jd: f64, min: f64, max: f64 },
    #[error("Failed to calculate position for {planet} at JD {jd}: {message}")]
    CalculationFailed {
        planet: PlanetId,
        jd: f64,
        message: String,
    },
    #[error("Degenerate position vector for {planet} at JD {jd}")]
    DegenerateVector { planet: PlanetId, jd: f64 },
}

/// Source of raw body positions.
///
/// Sun and Moon come back as apparent geocentric ecliptic longitudes of date.
/// Every other body comes back as a geocentric equatorial J2000 vector with
/// light-time and aberration applied; conversion to the ecliptic of date is
/// done by [`crate::ephemeris::frames`].
///
/// Implementations must be deterministic and side-effect free for a given
/// `jd_ut`.
pub trait EphemerisProvider: Send + Sync {
    /// Apparent geocentric ecliptic longitude of the Sun, degrees.
    fn apparent_sun_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError>;

    /// Geocentric ecliptic longitude of the Moon, degrees.
    fn geocentric_moon_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError>;

    /// Geocentric equatorial J2000 position vector (any length unit).
    fn equatorial_j2000_vector(
        &self,
        planet: PlanetId,
        jd_ut: f64,
    ) -> Result<[f64; 3], EphemerisError>;
}

/// Convert a UTC instant to a Julian day, keeping millisecond precision.
pub fn julian_day(dt: DateTime<Utc>) -> f64 {
    UNIX_EPOCH_JD + dt.timestamp_millis() as f64 / MILLIS_PER_DAY
}

/// Geographic location coordinates. Only constructed through
/// [`GeoLocation::new`], so deserialized values are validated too.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGeoLocation")]
pub struct GeoLocation {
    lat: f64,
    lon: f64,
}

#[derive(Deserialize)]
struct RawGeoLocation {
    lat: f64,
    lon: f64,
}

impl TryFrom<RawGeoLocation> for GeoLocation {
    type Error = HemeraError;

    fn try_from(raw: RawGeoLocation) -> Result<Self, Self::Error> {
        GeoLocation::new(raw.lat, raw.lon)
    }
}

impl GeoLocation {
    /// Build a location, rejecting out-of-range or non-finite coordinates.
    pub fn new(lat: f64, lon: f64) -> Result<Self, HemeraError> {
        let valid = lat.is_finite()
            && lon.is_finite()
            && (-90.0..=90.0).contains(&lat)
            && (-180.0..=180.0).contains(&lon);
        if !valid {
            return Err(HemeraError::InvalidLocation { lat, lon });
        }
        Ok(Self { lat, lon })
    }

    /// Latitude in degrees, north positive.
    pub fn lat(&self) -> f64 {
        self.lat
    }

    /// Longitude in degrees, east positive.
    pub fn lon(&self) -> f64 {
        self.lon
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_julian_day_j2000() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        assert!((julian_day(dt) - 2_451_545.0).abs() < 1e-9);
    }

    #[test]
    fn test_julian_day_keeps_millis() {
        let a = Utc.timestamp_millis_opt(1_735_689_600_000).unwrap();
        let b = Utc.timestamp_millis_opt(1_735_689_600_500).unwrap();
        let diff_secs = (julian_day(b) - julian_day(a)) * 86_400.0;
        assert!((diff_secs - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_geo_location_validation() {
        assert!(GeoLocation::new(51.48, 0.0).is_ok());
        assert!(GeoLocation::new(-90.0, 180.0).is_ok());
        assert!(GeoLocation::new(91.0, 0.0).is_err());
        assert!(GeoLocation::new(0.0, -180.5).is_err());
        assert!(GeoLocation::new(f64::NAN, 0.0).is_err());
    }

    #[test]
    fn test_geo_location_deserialize_is_validated() {
        let ok: GeoLocation = serde_json::from_str(r#"{"lat":23.81,"lon":90.41}"#).unwrap();
        assert_eq!(ok, GeoLocation::new(23.81, 90.41).unwrap());
        assert!(serde_json::from_str::<GeoLocation>(r#"{"lat":95.0,"lon":0.0}"#).is_err());
        assert!(serde_json::from_str::<GeoLocation>(r#"{"lat":0.0,"lon":-200.0}"#).is_err());

        let json = serde_json::to_string(&ok).unwrap();
        assert_eq!(json, r#"{"lat":23.81,"lon":90.41}"#);
    }
}

use crate::angle::normalize_angle_360;
use crate::error::HemeraError;
use crate::planet::PlanetId;
use crate::zodiac::{longitude_to_sign, ZodiacSign};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// ISO-8601 UTC with millisecond precision, e.g. `2025-01-01T00:00:00.000Z`.
pub fn canonical_timestamp(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_canonical<S: Serializer>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&canonical_timestamp(*dt))
}

/// Position of one planet. `sign` and `degree_in_sign` are always derived
/// from `longitude`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetPosition {
    pub planet: PlanetId,
    /// Ecliptic longitude of date, `[0, 360)`.
    pub longitude: f64,
    pub sign: ZodiacSign,
    /// `[0, 30)`
    pub degree_in_sign: f64,
    pub is_retrograde: bool,
}

impl PlanetPosition {
    pub fn new(planet: PlanetId, longitude: f64, is_retrograde: bool) -> Result<Self, HemeraError> {
        let longitude = normalize_angle_360(longitude)?;
        let placement = longitude_to_sign(longitude)?;
        Ok(Self {
            planet,
            longitude,
            sign: placement.sign,
            degree_in_sign: placement.degree_in_sign,
            is_retrograde,
        })
    }
}

/// All seven planets at one instant, in [`PlanetId::ALL`] order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSnapshot {
    #[serde(serialize_with = "serialize_canonical")]
    pub timestamp_utc: DateTime<Utc>,
    pub positions: Vec<PlanetPosition>,
}

impl PositionSnapshot {
    pub fn get(&self, planet: PlanetId) -> Option<&PlanetPosition> {
        self.positions.iter().find(|p| p.planet == planet)
    }
}

//! Sunrise and sunset lookup.

use crate::ephemeris::GeoLocation;
use crate::error::HemeraError;
use crate::hours::schedule::SunTimes;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};
use solar_positioning::{spa, Horizon, SunriseResult};

/// Supplies the sun events that bound a planetary day.
pub trait SunTimesProvider {
    /// Sunrise and sunset of the local civil `date` (in `offset`), and the
    /// sunrise of the day after.
    fn sun_times(
        &self,
        date: NaiveDate,
        location: GeoLocation,
        offset: FixedOffset,
    ) -> Result<SunTimes, HemeraError>;
}

/// Sun events from the NREL Solar Position Algorithm.
#[derive(Debug, Clone, Copy)]
pub struct SolarSunTimes {
    /// TT − UT in seconds.
    pub delta_t: f64,
}

impl Default for SolarSunTimes {
    fn default() -> Self {
        Self { delta_t: 69.0 }
    }
}

fn local_noon(date: NaiveDate, offset: FixedOffset) -> Option<DateTime<FixedOffset>> {
    let noon = date.and_time(NaiveTime::MIN) + Duration::hours(12);
    offset.from_local_datetime(&noon).single()
}

impl SolarSunTimes {
    /// Sunrise and sunset of the local day `date`. SPA picks the day whose
    /// transit falls on that local date, so events near 00:00 UTC are not
    /// lost to a UTC date boundary.
    fn rise_and_set(
        &self,
        date: NaiveDate,
        location: GeoLocation,
        offset: FixedOffset,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), HemeraError> {
        let noon = local_noon(date, offset).ok_or_else(|| HemeraError::NoSunrise {
            date,
            reason: format!("no local noon at offset {}", offset),
        })?;
        let result = spa::sunrise_sunset_for_horizon(
            noon,
            location.lat(),
            location.lon(),
            self.delta_t,
            Horizon::SunriseSunset,
        )
        .map_err(|e| HemeraError::NoSunrise {
            date,
            reason: e.to_string(),
        })?;

        match result {
            SunriseResult::RegularDay {
                sunrise, sunset, ..
            } => Ok((sunrise.with_timezone(&Utc), sunset.with_timezone(&Utc))),
            SunriseResult::AllDay { .. } => Err(HemeraError::NoSunrise {
                date,
                reason: "sun stays up all day (polar day)".to_string(),
            }),
            SunriseResult::AllNight { .. } => Err(HemeraError::NoSunrise {
                date,
                reason: "sun stays down all day (polar night)".to_string(),
            }),
        }
    }
}

impl SunTimesProvider for SolarSunTimes {
    fn sun_times(
        &self,
        date: NaiveDate,
        location: GeoLocation,
        offset: FixedOffset,
    ) -> Result<SunTimes, HemeraError> {
        let (sunrise, sunset) = self.rise_and_set(date, location, offset)?;
        let next_date = date.succ_opt().ok_or_else(|| HemeraError::NoSunrise {
            date,
            reason: "no following date".to_string(),
        })?;
        let (next_sunrise, _) = self.rise_and_set(next_date, location, offset)?;

        Ok(SunTimes {
            sunrise,
            sunset,
            next_sunrise,
        })
    }
}

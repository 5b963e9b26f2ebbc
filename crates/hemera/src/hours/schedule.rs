use crate::ephemeris::GeoLocation;
use crate::error::HemeraError;
use crate::hours::rulers::{day_ruler, hour_ruler};
use crate::hours::sun_times::SunTimesProvider;
use crate::planet::PlanetId;
use chrono::{DateTime, Datelike, Duration, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Sun events bounding one planetary day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SunTimes {
    pub sunrise: DateTime<Utc>,
    pub sunset: DateTime<Utc>,
    pub next_sunrise: DateTime<Utc>,
}

/// One of the 24 unequal hours of a planetary day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetaryHourInterval {
    /// 1..=12 for day hours, 13..=24 for night hours.
    pub index: u8,
    pub ruler: PlanetId,
    pub is_day: bool,
    pub start_local: DateTime<FixedOffset>,
    pub end_local: DateTime<FixedOffset>,
    pub is_current: bool,
}

/// Split `[start, end)` into twelve contiguous parts; returns 13 boundaries.
fn twelfths(start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<DateTime<Utc>> {
    let span_ms = (end - start).num_milliseconds();
    (0..=12)
        .map(|i| start + Duration::milliseconds(span_ms * i / 12))
        .collect()
}

/// Build the 24 planetary hours for `date` from its sun events.
///
/// The day ruler follows `date`'s weekday; hour 1 begins at sunrise.
/// `is_current` marks the interval containing `now` (start inclusive,
/// end exclusive), if any.
pub fn build_schedule(
    date: NaiveDate,
    sun: &SunTimes,
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> Result<Vec<PlanetaryHourInterval>, HemeraError> {
    if sun.sunrise >= sun.sunset || sun.sunset >= sun.next_sunrise {
        return Err(HemeraError::InvalidSunTimes {
            date,
            message: format!(
                "expected sunrise < sunset < next sunrise, got {} / {} / {}",
                sun.sunrise, sun.sunset, sun.next_sunrise
            ),
        });
    }

    let ruler = day_ruler(date.weekday().num_days_from_sunday() as i64);
    let day = twelfths(sun.sunrise, sun.sunset);
    let night = twelfths(sun.sunset, sun.next_sunrise);

    let mut intervals = Vec::with_capacity(24);
    for (is_day, bounds) in [(true, &day), (false, &night)] {
        for pair in bounds.windows(2) {
            let index = intervals.len() as u8 + 1;
            let (start, end) = (pair[0], pair[1]);
            intervals.push(PlanetaryHourInterval {
                index,
                ruler: hour_ruler(ruler, index as u32),
                is_day,
                start_local: start.with_timezone(&offset),
                end_local: end.with_timezone(&offset),
                is_current: start <= now && now < end,
            });
        }
    }
    Ok(intervals)
}

/// Look up sun events for `date` at `location` and build its schedule.
pub fn planetary_hours<S>(
    sun_times: &S,
    date: NaiveDate,
    location: GeoLocation,
    offset: FixedOffset,
    now: DateTime<Utc>,
) -> Result<Vec<PlanetaryHourInterval>, HemeraError>
where
    S: SunTimesProvider + ?Sized,
{
    let sun = sun_times.sun_times(date, location, offset)?;
    log::debug!(
        "Sun times for {} at ({}, {}): rise {} set {} next rise {}",
        date,
        location.lat(),
        location.lon(),
        sun.sunrise,
        sun.sunset,
        sun.next_sunrise
    );
    build_schedule(date, &sun, offset, now)
}

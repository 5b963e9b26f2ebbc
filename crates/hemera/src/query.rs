//! Position query handling: timestamp parsing, cache hints, JSON body.

use crate::ephemeris::EphemerisProvider;
use crate::error::HemeraError;
use crate::service::PositionService;
use crate::snapshot::PositionSnapshot;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::Serialize;

pub const NOW_CACHE_CONTROL: &str = "max-age=30, s-maxage=60, stale-while-revalidate=300";
pub const FIXED_CACHE_CONTROL: &str = "max-age=3600, s-maxage=86400, stale-while-revalidate=604800";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Now,
    Fixed,
}

impl RequestKind {
    pub fn cache_control(self) -> &'static str {
        match self {
            RequestKind::Now => NOW_CACHE_CONTROL,
            RequestKind::Fixed => FIXED_CACHE_CONTROL,
        }
    }
}

fn looks_numeric(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit() || c == '.')
}

/// Parse one timestamp.
///
/// Accepted forms, tried in order: a millisecond epoch numeral (integer or
/// decimal, fractional milliseconds are dropped), RFC 3339, a zone-less
/// ISO date-time (read as UTC), and a bare ISO date (midnight UTC).
pub fn try_parse_timestamp(raw: &str) -> Result<DateTime<Utc>, HemeraError> {
    let s = raw.trim();
    let invalid = || HemeraError::InvalidTimestamp {
        input: raw.to_string(),
    };

    if looks_numeric(s) {
        let millis: f64 = s.parse().map_err(|_| invalid())?;
        if !millis.is_finite() {
            return Err(invalid());
        }
        return Utc
            .timestamp_millis_opt(millis.floor() as i64)
            .single()
            .ok_or_else(invalid);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(Utc.from_utc_datetime(&naive));
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Ok(Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN)));
    }
    Err(invalid())
}

/// Optional timestamp parameter. Absent or unparseable input means "now";
/// parse failures are logged, never surfaced to the caller.
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?;
    match try_parse_timestamp(raw) {
        Ok(at) => Some(at),
        Err(e) => {
            log::warn!("{}; using current instant", e);
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PositionResponse {
    pub kind: RequestKind,
    pub snapshot: PositionSnapshot,
}

impl PositionResponse {
    pub fn cache_control(&self) -> &'static str {
        self.kind.cache_control()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.snapshot)
    }
}

/// Answer a position query with an optional raw timestamp parameter.
pub fn handle_position_query<P: EphemerisProvider>(
    service: &PositionService<P>,
    raw: Option<&str>,
) -> Result<PositionResponse, HemeraError> {
    let at = parse_timestamp(raw);
    let kind = if at.is_some() {
        RequestKind::Fixed
    } else {
        RequestKind::Now
    };
    let snapshot = service.get_positions(at)?;
    Ok(PositionResponse { kind, snapshot })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan1() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_parse_rfc3339() {
        assert_eq!(try_parse_timestamp("2025-01-01T00:00:00Z").unwrap(), jan1());
        assert_eq!(try_parse_timestamp("2025-01-01T02:00:00+02:00").unwrap(), jan1());
        assert_eq!(try_parse_timestamp("2025-01-01T00:00:00.000Z").unwrap(), jan1());
    }

    #[test]
    fn test_parse_naive_and_date() {
        assert_eq!(try_parse_timestamp("2025-01-01T00:00:00").unwrap(), jan1());
        assert_eq!(try_parse_timestamp("2025-01-01").unwrap(), jan1());
    }

    #[test]
    fn test_parse_epoch_millis() {
        assert_eq!(try_parse_timestamp("1735689600000").unwrap(), jan1());
        let with_fraction = try_parse_timestamp("1735689600123.9").unwrap();
        assert_eq!(with_fraction.timestamp_millis(), 1_735_689_600_123);
        assert_eq!(try_parse_timestamp("0").unwrap().timestamp(), 0);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for raw in ["", "yesterday", "2025-13-01", "1.2.3", "NaN", "-"] {
            assert!(
                matches!(try_parse_timestamp(raw), Err(HemeraError::InvalidTimestamp { .. })),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_timestamp_falls_back_to_now() {
        assert_eq!(parse_timestamp(None), None);
        assert_eq!(parse_timestamp(Some("not-a-date")), None);
        assert_eq!(parse_timestamp(Some("2025-01-01")), Some(jan1()));
    }

    #[test]
    fn test_cache_control_values() {
        assert_eq!(
            RequestKind::Now.cache_control(),
            "max-age=30, s-maxage=60, stale-while-revalidate=300"
        );
        assert_eq!(
            RequestKind::Fixed.cache_control(),
            "max-age=3600, s-maxage=86400, stale-while-revalidate=604800"
        );
    }
}

//! Engine-level errors.

use crate::ephemeris::EphemerisError;
use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can surface from position, sign and hour computations.
#[derive(Error, Debug)]
pub enum HemeraError {
    /// Unparseable or non-finite timestamp input. The query layer recovers
    /// from this locally by falling back to the current instant.
    #[error("Invalid timestamp: {input}")]
    InvalidTimestamp { input: String },
    #[error("Ephemeris unavailable: {0}")]
    EphemerisUnavailable(#[from] EphemerisError),
    /// A non-finite angle reached the normalizer.
    #[error("Invalid angle: {value}")]
    InvalidAngle { value: f64 },
    #[error("Invalid location: lat={lat}, lon={lon}")]
    InvalidLocation { lat: f64, lon: f64 },
    #[error("Invalid sun times for {date}: {message}")]
    InvalidSunTimes { date: NaiveDate, message: String },
    #[error("No sunrise/sunset on {date}: {reason}")]
    NoSunrise { date: NaiveDate, reason: String },
}

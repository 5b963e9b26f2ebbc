pub mod adapter;
pub mod frames;
pub mod types;

pub use adapter::SwissEphemerisAdapter;
pub use types::{julian_day, EphemerisError, EphemerisProvider, GeoLocation};

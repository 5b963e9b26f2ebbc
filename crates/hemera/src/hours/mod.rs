//! Planetary hours: day rulers, Chaldean succession and the 24-interval
//! schedule between consecutive sunrises.

pub mod rulers;
pub mod schedule;
pub mod sun_times;

pub use rulers::{chaldean_index, day_ruler, hour_ruler, CHALDEAN_ORDER};
pub use schedule::{build_schedule, planetary_hours, PlanetaryHourInterval, SunTimes};
pub use sun_times::{SolarSunTimes, SunTimesProvider};

//! Geocentric positions of the seven classical planets, with zodiac signs,
//! retrograde flags, planetary hours and a TTL-cached snapshot service.

pub mod angle;
pub mod cache;
pub mod clock;
pub mod dignities;
pub mod ephemeris;
pub mod error;
pub mod hours;
pub mod planet;
pub mod pruner;
pub mod query;
pub mod resolver;
pub mod retrograde;
pub mod service;
pub mod snapshot;
pub mod zodiac;

pub use cache::TtlCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use dignities::{sign_ruler, Dignity, DignityTable, DignityType};
pub use ephemeris::{EphemerisError, EphemerisProvider, GeoLocation, SwissEphemerisAdapter};
pub use error::HemeraError;
pub use planet::PlanetId;
pub use query::{handle_position_query, parse_timestamp, PositionResponse, RequestKind};
pub use service::{CachePolicy, PositionService};
pub use snapshot::{PlanetPosition, PositionSnapshot};
pub use zodiac::{longitude_to_sign, SignPlacement, ZodiacSign};

//! Day rulers and the Chaldean order.

use crate::planet::PlanetId;

/// Descending apparent speed; successive hour rulers cycle through it.
pub const CHALDEAN_ORDER: [PlanetId; 7] = [
    PlanetId::Saturn,
    PlanetId::Jupiter,
    PlanetId::Mars,
    PlanetId::Sun,
    PlanetId::Venus,
    PlanetId::Mercury,
    PlanetId::Moon,
];

/// Weekday rulers, 0 = Sunday.
const DAY_RULERS: [PlanetId; 7] = [
    PlanetId::Sun,
    PlanetId::Moon,
    PlanetId::Mars,
    PlanetId::Mercury,
    PlanetId::Jupiter,
    PlanetId::Venus,
    PlanetId::Saturn,
];

/// Ruler of the weekday (0 = Sunday … 6 = Saturday). Any integer is
/// accepted and wrapped, so -1 is Saturday.
pub fn day_ruler(weekday: i64) -> PlanetId {
    DAY_RULERS[weekday.rem_euclid(7) as usize]
}

/// Position of `planet` in [`CHALDEAN_ORDER`].
pub fn chaldean_index(planet: PlanetId) -> usize {
    match planet {
        PlanetId::Saturn => 0,
        PlanetId::Jupiter => 1,
        PlanetId::Mars => 2,
        PlanetId::Sun => 3,
        PlanetId::Venus => 4,
        PlanetId::Mercury => 5,
        PlanetId::Moon => 6,
    }
}

/// Ruler of hour `n` (1-based, counted from sunrise) on a day ruled by
/// `day_ruler`. Hour 1 is always the day ruler itself.
pub fn hour_ruler(day_ruler: PlanetId, n: u32) -> PlanetId {
    let offset = (n.max(1) - 1) as usize;
    CHALDEAN_ORDER[(chaldean_index(day_ruler) + offset) % 7]
}

//! Deterministic ephemeris for integration tests.

#![allow(dead_code)]

use hemera::{EphemerisError, EphemerisProvider, PlanetId};
use std::sync::atomic::{AtomicUsize, Ordering};

const J2000: f64 = 2_451_545.0;
const OBLIQUITY_J2000: f64 = 23.439_291;

/// Longitudes that move linearly with time. Planets are reported as J2000
/// equatorial unit vectors, like the real adapter does.
pub struct SyntheticProvider {
    /// Degrees per day, indexed in `PlanetId::ALL` order.
    pub rates: [f64; 7],
    pub fail_on: Option<PlanetId>,
    pub calls: AtomicUsize,
}

impl Default for SyntheticProvider {
    fn default() -> Self {
        Self {
            // Mercury runs backwards so one body is retrograde.
            rates: [0.9856, 13.176, -1.0, 1.2, 0.52, 0.083, 0.033],
            fail_on: None,
            calls: AtomicUsize::new(0),
        }
    }
}

impl SyntheticProvider {
    pub fn failing_on(planet: PlanetId) -> Self {
        Self {
            fail_on: Some(planet),
            ..Self::default()
        }
    }

    /// Every body moves backwards, the Sun and Moon included.
    pub fn all_backwards() -> Self {
        Self {
            rates: [-0.9856, -13.176, -1.0, -1.2, -0.52, -0.083, -0.033],
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn longitude(&self, planet: PlanetId, jd: f64) -> Result<f64, EphemerisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_on == Some(planet) {
            return Err(EphemerisError::CalculationFailed {
                planet,
                jd,
                message: "synthetic failure".to_string(),
            });
        }
        let base = 40.0 * planet as usize as f64;
        Ok((base + self.rates[planet as usize] * (jd - J2000)).rem_euclid(360.0))
    }
}

impl EphemerisProvider for SyntheticProvider {
    fn apparent_sun_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.longitude(PlanetId::Sun, jd_ut)
    }

    fn geocentric_moon_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        self.longitude(PlanetId::Moon, jd_ut)
    }

    fn equatorial_j2000_vector(
        &self,
        planet: PlanetId,
        jd_ut: f64,
    ) -> Result<[f64; 3], EphemerisError> {
        let lon = self.longitude(planet, jd_ut)?.to_radians();
        let eps = OBLIQUITY_J2000.to_radians();
        Ok([lon.cos(), lon.sin() * eps.cos(), lon.sin() * eps.sin()])
    }
}

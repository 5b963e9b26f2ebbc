use crate::ephemeris::types::{EphemerisError, EphemerisProvider};
use crate::planet::PlanetId;
use std::path::PathBuf;
use std::sync::Mutex;
use swisseph::swe::{calc_ut, set_ephe_path};

// Swiss Ephemeris flag bits (swephexp.h)
const FLG_SWIEPH: i32 = 2;
const FLG_MOSEPH: i32 = 4;
const FLG_J2000: i32 = 32;
const FLG_EQUATORIAL: i32 = 2 * 1024;
const FLG_XYZ: i32 = 4 * 1024;

/// Range covered by the Moshier ephemeris, roughly 3000 BCE to 3000 CE.
pub const MIN_SUPPORTED_JD: f64 = 625_000.5;
pub const MAX_SUPPORTED_JD: f64 = 2_818_000.5;

/// Ephemeris path currently applied to the C library, which keeps it in
/// process-global state. Every `swe_calc_ut` call holds this lock.
static SWISS_STATE: Mutex<Option<String>> = Mutex::new(None);

fn needs_path_switch(applied: Option<&str>, wanted: &str) -> bool {
    applied != Some(wanted)
}

fn body_code(planet: PlanetId) -> i32 {
    match planet {
        PlanetId::Sun => 0,
        PlanetId::Moon => 1,
        PlanetId::Mercury => 2,
        PlanetId::Venus => 3,
        PlanetId::Mars => 4,
        PlanetId::Jupiter => 5,
        PlanetId::Saturn => 6,
    }
}

/// Swiss Ephemeris adapter implementation
pub struct SwissEphemerisAdapter {
    ephemeris_path: Option<PathBuf>,
    // UTF-8 form of `ephemeris_path` handed to `swe_set_ephe_path`
    ephe_path_str: Option<String>,
    base_flags: i32,
}

impl SwissEphemerisAdapter {
    /// Create a new adapter.
    ///
    /// With `None` the built-in Moshier ephemeris is used and no data files
    /// are needed. With a path, the Swiss data files under it are used.
    pub fn new(ephemeris_path: Option<PathBuf>) -> Result<Self, EphemerisError> {
        let (ephe_path_str, base_flags) = match &ephemeris_path {
            Some(path) => {
                if !path.exists() {
                    return Err(EphemerisError::FileNotFound {
                        path: path.display().to_string(),
                        message: "Ephemeris path does not exist. Please ensure Swiss Ephemeris data files are installed.".to_string(),
                    });
                }
                let path_str = path
                    .to_str()
                    .filter(|s| !s.contains('\0'))
                    .ok_or_else(|| EphemerisError::FileNotFound {
                        path: path.display().to_string(),
                        message: "Ephemeris path must be valid UTF-8 without NUL bytes.".to_string(),
                    })?;
                (Some(path_str.to_string()), FLG_SWIEPH)
            }
            None => (None, FLG_MOSEPH),
        };

        log::info!(
            "Swiss Ephemeris adapter ready ({})",
            ephemeris_path
                .as_ref()
                .map(|p| format!("data files at {}", p.display()))
                .unwrap_or_else(|| "Moshier".to_string())
        );

        Ok(Self {
            ephemeris_path,
            ephe_path_str,
            base_flags,
        })
    }

    pub fn ephemeris_path(&self) -> Option<&PathBuf> {
        self.ephemeris_path.as_ref()
    }

    fn check_range(jd: f64) -> Result<(), EphemerisError> {
        if !jd.is_finite() || !(MIN_SUPPORTED_JD..=MAX_SUPPORTED_JD).contains(&jd) {
            return Err(EphemerisError::OutOfRange {
                jd,
                min: MIN_SUPPORTED_JD,
                max: MAX_SUPPORTED_JD,
            });
        }
        Ok(())
    }

    /// Raw `swe_calc_ut` call for one body, returning the three coordinates.
    fn calc(&self, planet: PlanetId, jd: f64, extra_flags: i32) -> Result<[f64; 3], EphemerisError> {
        Self::check_range(jd)?;
        let flags = self.base_flags | extra_flags;
        let mut applied = SWISS_STATE.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(wanted) = &self.ephe_path_str {
            if needs_path_switch(applied.as_deref(), wanted) {
                log::debug!("Switching Swiss Ephemeris data path to {}", wanted);
                set_ephe_path(wanted);
                *applied = Some(wanted.clone());
            }
        }
        let result = calc_ut(jd, body_code(planet) as u32, flags as u32).map_err(|e| {
            EphemerisError::CalculationFailed {
                planet,
                jd,
                message: format!("Swiss Ephemeris error: {}", e),
            }
        })?;

        let out = result.out;
        Ok([out[0], out[1], out[2]])
    }
}

impl EphemerisProvider for SwissEphemerisAdapter {
    fn apparent_sun_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Ok(self.calc(PlanetId::Sun, jd_ut, 0)?[0])
    }

    fn geocentric_moon_longitude(&self, jd_ut: f64) -> Result<f64, EphemerisError> {
        Ok(self.calc(PlanetId::Moon, jd_ut, 0)?[0])
    }

    fn equatorial_j2000_vector(
        &self,
        planet: PlanetId,
        jd_ut: f64,
    ) -> Result<[f64; 3], EphemerisError> {
        self.calc(planet, jd_ut, FLG_EQUATORIAL | FLG_XYZ | FLG_J2000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_path_is_rejected() {
        let result = SwissEphemerisAdapter::new(Some(PathBuf::from("/definitely/not/here/swisseph")));
        assert!(matches!(result, Err(EphemerisError::FileNotFound { .. })));
    }

    #[test]
    fn test_out_of_range_fails_before_calculation() {
        let adapter = SwissEphemerisAdapter::new(None).unwrap();
        let err = adapter.apparent_sun_longitude(MAX_SUPPORTED_JD + 1.0).unwrap_err();
        assert!(matches!(err, EphemerisError::OutOfRange { .. }));
        let err = adapter
            .equatorial_j2000_vector(PlanetId::Mars, f64::NAN)
            .unwrap_err();
        assert!(matches!(err, EphemerisError::OutOfRange { .. }));
    }

    #[test]
    fn test_nul_in_path_is_rejected() {
        let result = SwissEphemerisAdapter::new(Some(PathBuf::from("/tmp/ephe\0data")));
        assert!(matches!(result, Err(EphemerisError::FileNotFound { .. })));
    }

    #[test]
    fn test_path_switch_only_when_changed() {
        assert!(needs_path_switch(None, "/data/ephe"));
        assert!(needs_path_switch(Some("/data/other"), "/data/ephe"));
        assert!(!needs_path_switch(Some("/data/ephe"), "/data/ephe"));
    }

    #[test]
    fn test_body_codes_match_swiss_numbering() {
        let codes: Vec<i32> = PlanetId::ALL.iter().map(|p| body_code(*p)).collect();
        assert_eq!(codes, vec![0, 1, 2, 3, 4, 5, 6]);
    }
}

use chrono::{TimeZone, Utc};
use hemera::{
    EphemerisError, ManualClock, PlanetId, PositionService, SwissEphemerisAdapter, ZodiacSign,
};
use std::path::PathBuf;
use std::sync::Arc;

fn moshier_service() -> PositionService<SwissEphemerisAdapter> {
    let adapter = SwissEphemerisAdapter::new(None).unwrap();
    let clock = Arc::new(ManualClock::new(Utc::now()));
    PositionService::new(adapter, clock)
}

#[test]
fn test_missing_ephemeris_path() {
    let result = SwissEphemerisAdapter::new(Some(PathBuf::from("/nonexistent/ephe")));
    assert!(matches!(result, Err(EphemerisError::FileNotFound { .. })));
}

#[test]
#[ignore] // Requires the native Swiss Ephemeris library
fn test_new_year_2025_sky() {
    let service = moshier_service();
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let snapshot = service.get_positions(Some(at)).unwrap();
    let get = |planet| snapshot.get(planet).unwrap();

    let sun = get(PlanetId::Sun);
    assert_eq!(sun.sign, ZodiacSign::Capricorn);
    assert!((280.0..281.5).contains(&sun.longitude), "sun {}", sun.longitude);

    assert_eq!(get(PlanetId::Mercury).sign, ZodiacSign::Sagittarius);
    assert!(!get(PlanetId::Mercury).is_retrograde);

    assert!(get(PlanetId::Mars).is_retrograde);
    assert!(matches!(get(PlanetId::Mars).sign, ZodiacSign::Cancer | ZodiacSign::Leo));

    assert_eq!(get(PlanetId::Jupiter).sign, ZodiacSign::Gemini);
    assert!(get(PlanetId::Jupiter).is_retrograde);

    assert_eq!(get(PlanetId::Saturn).sign, ZodiacSign::Pisces);
    assert!(!get(PlanetId::Saturn).is_retrograde);
}

#[test]
#[ignore] // Requires the native Swiss Ephemeris library
fn test_end_to_end_repeatable() {
    let service = moshier_service();
    let at = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();
    let first = service.get_positions(Some(at)).unwrap();
    let second = moshier_service().get_positions(Some(at)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.positions.len(), 7);
    for (p, planet) in first.positions.iter().zip(PlanetId::ALL) {
        assert_eq!(p.planet, planet);
        assert!((0.0..360.0).contains(&p.longitude));
        assert!((0.0..30.0).contains(&p.degree_in_sign));
    }
}

#[test]
fn test_out_of_range_instant_fails() {
    let service = moshier_service();
    let at = Utc.with_ymd_and_hms(3500, 1, 1, 0, 0, 0).unwrap();
    assert!(service.get_positions(Some(at)).is_err());
    assert!(service.cache().is_empty());
}

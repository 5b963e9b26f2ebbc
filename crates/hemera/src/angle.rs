//! Angle normalization.
//!
//! Every longitude that leaves this crate passes through
//! [`normalize_angle_360`]; every longitude difference used for motion
//! classification passes through [`normalize_delta_180`].

use crate::error::HemeraError;

fn ensure_finite(degrees: f64) -> Result<f64, HemeraError> {
    if degrees.is_finite() {
        Ok(degrees)
    } else {
        Err(HemeraError::InvalidAngle { value: degrees })
    }
}

/// Reduce any finite angle into `[0, 360)`.
pub fn normalize_angle_360(degrees: f64) -> Result<f64, HemeraError> {
    let d = ensure_finite(degrees)?;
    let mut r = d % 360.0;
    if r < 0.0 {
        r += 360.0;
    }
    // -1e-17 % 360 + 360 rounds to exactly 360.0
    if r >= 360.0 {
        r = 0.0;
    }
    Ok(r)
}

/// Reduce an angular difference into the shortest signed delta `(-180, 180]`.
pub fn normalize_delta_180(degrees: f64) -> Result<f64, HemeraError> {
    let r = normalize_angle_360(degrees)?;
    let delta = if r > 180.0 { r - 360.0 } else { r };
    if delta <= -180.0 {
        Ok(180.0)
    } else {
        Ok(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_angle_360_range() {
        for x in [-1080.5, -360.0, -0.25, 0.0, 12.5, 359.999, 360.0, 725.0, 1.0e9] {
            let n = normalize_angle_360(x).unwrap();
            assert!((0.0..360.0).contains(&n), "{x} -> {n}");
        }
    }

    #[test]
    fn test_normalize_angle_360_periodic() {
        for k in -5..=5 {
            let base = normalize_angle_360(42.5).unwrap();
            let shifted = normalize_angle_360(42.5 + 360.0 * k as f64).unwrap();
            assert!((base - shifted).abs() < 1e-9, "k={k}: {base} vs {shifted}");
        }
        assert_eq!(normalize_angle_360(-90.0).unwrap(), 270.0);
        assert_eq!(normalize_angle_360(360.0).unwrap(), 0.0);
    }

    #[test]
    fn test_normalize_angle_360_tiny_negative() {
        assert_eq!(normalize_angle_360(-1e-17).unwrap(), 0.0);
    }

    #[test]
    fn test_normalize_delta_180() {
        assert_eq!(normalize_delta_180(-180.0).unwrap(), 180.0);
        assert_eq!(normalize_delta_180(180.0).unwrap(), 180.0);
        assert_eq!(normalize_delta_180(540.0).unwrap(), 180.0);
        assert_eq!(normalize_delta_180(-540.0).unwrap(), 180.0);
        assert_eq!(normalize_delta_180(190.0).unwrap(), -170.0);
        assert_eq!(normalize_delta_180(-190.0).unwrap(), 170.0);
        assert_eq!(normalize_delta_180(-0.5).unwrap(), -0.5);
        assert!((normalize_delta_180(3600.0 - 0.25).unwrap() + 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_delta_180_range() {
        let mut x = -2000.0;
        while x < 2000.0 {
            let d = normalize_delta_180(x).unwrap();
            assert!(d > -180.0 && d <= 180.0, "{x} -> {d}");
            x += 7.25;
        }
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            normalize_angle_360(f64::NAN),
            Err(HemeraError::InvalidAngle { .. })
        ));
        assert!(normalize_delta_180(f64::INFINITY).is_err());
        assert!(normalize_angle_360(f64::NEG_INFINITY).is_err());
    }
}

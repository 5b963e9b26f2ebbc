//! Frame conversion from the J2000 mean equator to the true ecliptic of date.
//!
//! Pipeline: IAU 1976 precession (ζ, z, θ) carries a J2000 equatorial vector
//! to the mean equator and equinox of date; rotating about the x axis by the
//! IAU 1980 mean obliquity gives the mean ecliptic of date; adding nutation
//! in longitude (Δψ) gives the true ecliptic of date.
//!
//! Source: Lieske et al. 1977; Meeus, _Astronomical Algorithms_ ch. 21–22.

const J2000_JD: f64 = 2_451_545.0;
const DAYS_PER_CENTURY: f64 = 36_525.0;
const ARCSEC_TO_RAD: f64 = std::f64::consts::PI / 648_000.0;

/// Julian centuries since J2000.0.
pub fn julian_centuries(jd: f64) -> f64 {
    (jd - J2000_JD) / DAYS_PER_CENTURY
}

/// Precession angles `(ζ, z, θ)` in radians from J2000 to the epoch `t`.
pub fn precession_angles(t: f64) -> (f64, f64, f64) {
    let t2 = t * t;
    let t3 = t2 * t;
    let zeta = 2306.2181 * t + 0.30188 * t2 + 0.017998 * t3;
    let z = 2306.2181 * t + 1.09468 * t2 + 0.018203 * t3;
    let theta = 2004.3109 * t - 0.42665 * t2 - 0.041833 * t3;
    (zeta * ARCSEC_TO_RAD, z * ARCSEC_TO_RAD, theta * ARCSEC_TO_RAD)
}

/// Rotate a J2000 mean-equatorial vector to the mean equator of date.
pub fn precess_from_j2000(v: &[f64; 3], t: f64) -> [f64; 3] {
    let (zeta, z, theta) = precession_angles(t);
    let (sz, cz) = zeta.sin_cos();
    let (szz, czz) = z.sin_cos();
    let (st, ct) = theta.sin_cos();

    let m = [
        [
            cz * ct * czz - sz * szz,
            -sz * ct * czz - cz * szz,
            -st * czz,
        ],
        [
            cz * ct * szz + sz * czz,
            -sz * ct * szz + cz * czz,
            -st * szz,
        ],
        [cz * st, -sz * st, ct],
    ];

    [
        m[0][0] * v[0] + m[0][1] * v[1] + m[0][2] * v[2],
        m[1][0] * v[0] + m[1][1] * v[1] + m[1][2] * v[2],
        m[2][0] * v[0] + m[2][1] * v[1] + m[2][2] * v[2],
    ]
}

/// IAU 1980 mean obliquity of the ecliptic, radians.
pub fn mean_obliquity(t: f64) -> f64 {
    let arcsec = 84_381.448 - 46.8150 * t - 0.00059 * t * t + 0.001813 * t * t * t;
    arcsec * ARCSEC_TO_RAD
}

/// Nutation in longitude and obliquity `(Δψ, Δε)` in radians.
///
/// Four-term IAU 1980 truncation, good to about 0.5″.
pub fn nutation(t: f64) -> (f64, f64) {
    let sun_mean_lon = (280.4665 + 36_000.7698 * t).to_radians();
    let moon_mean_lon = (218.3165 + 481_267.8813 * t).to_radians();
    let node = (125.04452 - 1934.136261 * t).to_radians();

    let dpsi = -17.20 * node.sin() - 1.32 * (2.0 * sun_mean_lon).sin()
        - 0.23 * (2.0 * moon_mean_lon).sin()
        + 0.21 * (2.0 * node).sin();
    let deps = 9.20 * node.cos() + 0.57 * (2.0 * sun_mean_lon).cos()
        + 0.10 * (2.0 * moon_mean_lon).cos()
        - 0.09 * (2.0 * node).cos();

    (dpsi * ARCSEC_TO_RAD, deps * ARCSEC_TO_RAD)
}

/// Rotate an equatorial vector into the ecliptic frame with obliquity `eps`.
pub fn equatorial_to_ecliptic(v: &[f64; 3], eps: f64) -> [f64; 3] {
    let (se, ce) = eps.sin_cos();
    [v[0], ce * v[1] + se * v[2], -se * v[1] + ce * v[2]]
}

/// Ecliptic longitude (degrees, unnormalized) of a J2000 equatorial vector,
/// referred to the true ecliptic and equinox of date `jd`.
///
/// Returns `None` for a zero, non-finite or ecliptic-polar vector.
pub fn j2000_equatorial_to_true_ecliptic_longitude(v: &[f64; 3], jd: f64) -> Option<f64> {
    if !v.iter().all(|c| c.is_finite()) || v.iter().all(|c| *c == 0.0) {
        return None;
    }
    let t = julian_centuries(jd);
    let of_date = precess_from_j2000(v, t);
    let ecl = equatorial_to_ecliptic(&of_date, mean_obliquity(t));
    if ecl[0] == 0.0 && ecl[1] == 0.0 {
        return None;
    }
    let (dpsi, _) = nutation(t);
    Some((ecl[1].atan2(ecl[0]) + dpsi).to_degrees())
}

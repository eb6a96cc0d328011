//! Distance conversions between meters, kilometers and decimal degrees
//!
//! Degree conversions use a spherical earth of fixed radius. Longitude
//! degrees are treated like latitude degrees regardless of latitude, so
//! east-west distances grow increasingly inaccurate towards the poles.

use std::f64::consts::PI;

/// Mean earth radius used by every degree conversion
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Degrees, minutes and seconds of a decimal coordinate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dms {
    /// Carries the sign of the coordinate
    pub degrees: i32,
    pub minutes: u32,
    pub seconds: f64,
}

/// Convert a distance in meters to kilometers
pub fn m_to_km(distance_m: f64) -> f64 {
    distance_m / 1000.0
}

/// Convert a distance in kilometers to an arc in decimal degrees
pub fn km_to_degrees(distance_km: f64) -> f64 {
    (distance_km / EARTH_RADIUS_KM) * (180.0 / PI)
}

/// Inverse of [`km_to_degrees`]
pub fn degrees_to_km(distance_degrees: f64) -> f64 {
    distance_degrees * (PI / 180.0) * EARTH_RADIUS_KM
}

/// Rough decimal degrees to kilometers (0.1° ≈ 11.1 km)
pub fn decimal_to_km(decimal_distance: f64) -> f64 {
    (decimal_distance * 11.1) / 0.1
}

/// Split a decimal coordinate into degrees, minutes and seconds
///
/// Degrees and minutes are truncated; the sign is only carried by `degrees`,
/// so coordinates in (-1, 0) come back with `degrees == 0` and lose it.
pub fn decimal_to_dms(decimal_coord: f64) -> Dms {
    let is_positive = decimal_coord >= 0.0;
    let coord = decimal_coord.abs();
    let degrees = coord.trunc();
    let minutes = ((coord - degrees) * 60.0).trunc();
    let seconds = ((coord - degrees) * 60.0 - minutes) * 60.0;

    let degrees = degrees as i32;
    Dms {
        degrees: if is_positive { degrees } else { -degrees },
        minutes: minutes as u32,
        seconds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_m_to_km() {
        assert_eq!(m_to_km(1500.0), 1.5);
        assert_eq!(m_to_km(0.0), 0.0);
    }

    #[test]
    fn test_km_to_degrees() {
        // One degree of arc on a 6371 km sphere is ~111.19 km
        let one_degree_km = 2.0 * PI * EARTH_RADIUS_KM / 360.0;
        assert!((km_to_degrees(one_degree_km) - 1.0).abs() < EPS);
        assert!((km_to_degrees(111.195) - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_degrees_to_km_inverts_km_to_degrees() {
        for km in [0.25, 1.0, 12.5, 400.0] {
            assert!((degrees_to_km(km_to_degrees(km)) - km).abs() < EPS);
        }
    }

    #[test]
    fn test_decimal_to_km() {
        assert!((decimal_to_km(0.1) - 11.1).abs() < EPS);
        assert!((decimal_to_km(1.0) - 111.0).abs() < EPS);
    }

    #[test]
    fn test_decimal_to_dms() {
        let dms = decimal_to_dms(46.1816);
        assert_eq!(dms.degrees, 46);
        assert_eq!(dms.minutes, 10);
        assert!((dms.seconds - 53.76).abs() < 1e-6);

        let west = decimal_to_dms(-1.5);
        assert_eq!(west.degrees, -1);
        assert_eq!(west.minutes, 30);
        assert!(west.seconds.abs() < 1e-6);
    }

    #[test]
    fn test_decimal_to_dms_loses_sign_below_one_degree() {
        let dms = decimal_to_dms(-0.5);
        assert_eq!(dms.degrees, 0);
        assert_eq!(dms.minutes, 30);
    }
}

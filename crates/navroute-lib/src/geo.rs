//! Geodesic helpers.
//!
//! Distances are great-circle distances on a spherical Earth, expressed in
//! nautical miles. The same metric is used for computed edge costs and as the
//! A* heuristic, so both sides of the comparison share one unit.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Error, Result};

/// Mean Earth radius in nautical miles.
pub const EARTH_RADIUS_NM: f64 = 3440.065;

/// Validated latitude/longitude pair in signed decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Build a coordinate, rejecting values outside [-90, 90] / [-180, 180].
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        let valid = latitude.is_finite()
            && longitude.is_finite()
            && (-90.0..=90.0).contains(&latitude)
            && (-180.0..=180.0).contains(&longitude);
        if !valid {
            return Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Parse a `LAT,LON` pair such as `38.07325,-8.87915`.
    pub fn parse(input: &str) -> Result<Self> {
        let syntax = || Error::CoordinateSyntax {
            input: input.to_string(),
        };
        let (lat, lon) = input.split_once(',').ok_or_else(syntax)?;
        let latitude = lat.trim().parse::<f64>().map_err(|_| syntax())?;
        let longitude = lon.trim().parse::<f64>().map_err(|_| syntax())?;
        Self::new(latitude, longitude)
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Great-circle distance to `other` in nautical miles.
    pub fn distance_to(&self, other: &Self) -> f64 {
        distance(*self, *other)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.5},{:.5}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Haversine distance between `a` and `b` in nautical miles.
///
/// Symmetric, zero for identical inputs, and a metric on the sphere, which
/// keeps it admissible as a search heuristic against published airway
/// distances.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let d_lat = lat2 - lat1;
    let d_lon = (b.longitude - a.longitude).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push h marginally above 1 for antipodal points.
    let h = h.clamp(0.0, 1.0);
    2.0 * EARTH_RADIUS_NM * h.sqrt().asin()
}

/// Distance between two raw lat/lon pairs, validating both.
pub fn distance_checked(a: (f64, f64), b: (f64, f64)) -> Result<f64> {
    let a = Coordinate::new(a.0, a.1)?;
    let b = Coordinate::new(b.0, b.1)?;
    Ok(distance(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coord(lat: f64, lon: f64) -> Coordinate {
        Coordinate::new(lat, lon).expect("valid coordinate")
    }

    #[test]
    fn one_degree_of_latitude_is_sixty_nautical_miles() {
        let d = distance(coord(0.0, 0.0), coord(1.0, 0.0));
        assert!((d - 60.04).abs() < 0.05, "got {d}");
    }

    #[test]
    fn distance_is_symmetric_and_zero_on_identical_points() {
        let manik = coord(40.69185, -8.61617);
        let pairs = [
            (manik, coord(-33.8688, 151.2093)),
            (coord(52.1, 5.2), coord(37.49751, -8.38401)),
            (coord(89.9, 0.0), coord(-89.9, 179.9)),
            (coord(0.0, -179.5), coord(0.0, 179.5)),
        ];
        for (a, b) in pairs {
            assert_eq!(distance(a, b), distance(b, a), "{a} vs {b}");
            assert_eq!(distance(a, a), 0.0);
            assert_eq!(distance(b, b), 0.0);
        }
    }

    #[test]
    fn antipodal_points_do_not_produce_nan() {
        let d = distance(coord(0.0, 0.0), coord(0.0, 180.0));
        assert!(d.is_finite());
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_NM).abs() < 1e-6);
    }

    #[test]
    fn rejects_out_of_range_values() {
        assert!(matches!(
            Coordinate::new(91.0, 0.0),
            Err(Error::InvalidCoordinate { .. })
        ));
        assert!(matches!(
            Coordinate::new(0.0, -180.5),
            Err(Error::InvalidCoordinate { .. })
        ));
        assert!(Coordinate::new(f64::NAN, 0.0).is_err());
        assert!(distance_checked((0.0, 0.0), (0.0, 200.0)).is_err());
    }

    #[test]
    fn parses_lat_lon_pairs() {
        let c: Coordinate = " 38.07325, -8.87915 ".parse().expect("parses");
        assert_eq!(c.latitude(), 38.07325);
        assert_eq!(c.longitude(), -8.87915);
        assert!(matches!(
            Coordinate::parse("38.0"),
            Err(Error::CoordinateSyntax { .. })
        ));
        assert!(matches!(
            Coordinate::parse("north,south"),
            Err(Error::CoordinateSyntax { .. })
        ));
    }
}

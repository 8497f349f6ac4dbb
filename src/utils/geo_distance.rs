//! Great-circle Distance
//!
//! Haversine distance in miles between two coordinates. Missing coordinates
//! (see `Coordinate::is_missing`) yield `None` ("unknown") rather than an error.

use crate::data::Coordinate;

/// Mean Earth radius in miles
pub const EARTH_RADIUS_MILES: f64 = 3958.8;

/// Haversine distance in miles, unrounded
///
/// Identical coordinates are exactly 0.0 miles apart, checked before the
/// missing-coordinate rule so that (0, 0) → (0, 0) is 0.0 rather than unknown.
pub fn distance_miles(from: Coordinate, to: Coordinate) -> Option<f64> {
    if from == to && from.lat.is_finite() && from.lng.is_finite() {
        return Some(0.0);
    }
    if from.is_missing() || to.is_missing() {
        return None;
    }

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let dlat = (to.lat - from.lat).to_radians();
    let dlng = (to.lng - from.lng).to_radians();

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    Some(EARTH_RADIUS_MILES * c)
}

/// Round a distance to one decimal place for display
pub fn round_for_display(miles: f64) -> f64 {
    (miles * 10.0).round() / 10.0
}

/// Sort key for distances: unknown sorts as the largest possible distance
pub fn distance_sort_key(distance: Option<f64>) -> f64 {
    distance.unwrap_or(f64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_identical_points() {
        assert_eq!(distance_miles(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 0.0)), Some(0.0));
        assert_eq!(distance_miles(Coordinate::new(40.0, -75.0), Coordinate::new(40.0, -75.0)), Some(0.0));
    }

    #[test]
    fn test_zero_coordinate_unknown() {
        assert_eq!(distance_miles(Coordinate::new(0.0, 0.0), Coordinate::new(40.0, -75.0)), None);
        assert_eq!(distance_miles(Coordinate::new(40.0, -75.0), Coordinate::new(0.0, 0.0)), None);
        assert_eq!(distance_miles(Coordinate::new(f64::NAN, -75.0), Coordinate::new(40.0, -75.0)), None);
    }

    #[test]
    fn test_known_distance() {
        // New York (JFK) to Los Angeles (LAX), ~2475 miles
        let jfk = Coordinate::new(40.6413, -73.7781);
        let lax = Coordinate::new(33.9416, -118.4085);
        let d = distance_miles(jfk, lax).unwrap();
        assert_relative_eq!(d, 2475.0, epsilon = 10.0);

        // Symmetric
        assert_relative_eq!(d, distance_miles(lax, jfk).unwrap(), epsilon = 1e-9);
    }

    #[test]
    fn test_one_degree_latitude() {
        // One degree of latitude = R * pi / 180
        let d = distance_miles(Coordinate::new(10.0, 20.0), Coordinate::new(11.0, 20.0)).unwrap();
        assert_relative_eq!(d, EARTH_RADIUS_MILES * std::f64::consts::PI / 180.0, epsilon = 1e-6);
        assert_relative_eq!(round_for_display(d), 69.1, epsilon = 1e-9);
    }

    #[test]
    fn test_sort_key() {
        assert_eq!(distance_sort_key(Some(3.2)), 3.2);
        assert!(distance_sort_key(None) > 1.0e300);
    }
}

//! Great-circle distance between the cardholder and the merchant

use tracing::debug;

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Geodesic distance in kilometers between two (latitude, longitude) pairs.
///
/// Out-of-range or non-finite coordinates yield 0.0 (no distance signal)
/// rather than an error.
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if !valid_coordinate(lat1, lon1) || !valid_coordinate(lat2, lon2) {
        debug!(lat1, lon1, lat2, lon2, "Invalid coordinates, using zero distance");
        return 0.0;
    }
    haversine_km(lat1, lon1, lat2, lon2)
}

fn valid_coordinate(lat: f64, lon: f64) -> bool {
    lat.is_finite() && lon.is_finite() && lat.abs() <= 90.0 && lon.abs() <= 180.0
}

fn haversine_km(lat1_deg: f64, lon1_deg: f64, lat2_deg: f64, lon2_deg: f64) -> f64 {
    let lat1 = lat1_deg.to_radians();
    let lat2 = lat2_deg.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (lon2_deg - lon1_deg).to_radians();

    let a = ((dlat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distance_is_symmetric() {
        let forward = distance_km(40.0, -73.0, 40.1, -73.1);
        let backward = distance_km(40.1, -73.1, 40.0, -73.0);
        assert!((forward - backward).abs() < 1e-9);
    }

    #[test]
    fn test_known_distance() {
        // Roughly 0.1 degrees in each direction at latitude 40; about 14 km.
        let km = distance_km(40.0, -73.0, 40.1, -73.1);
        assert!(km > 13.0 && km < 15.5, "unexpected distance: {km}");
    }

    #[test]
    fn test_same_point_is_zero() {
        let km = distance_km(51.5, -0.12, 51.5, -0.12);
        assert!(km.abs() < 1e-9);
    }

    #[test]
    fn test_out_of_range_latitude_yields_zero() {
        assert_eq!(distance_km(200.0, -73.0, 40.1, -73.1), 0.0);
        assert_eq!(distance_km(40.0, -73.0, -91.0, -73.1), 0.0);
    }

    #[test]
    fn test_out_of_range_longitude_yields_zero() {
        assert_eq!(distance_km(40.0, 181.0, 40.1, -73.1), 0.0);
        assert_eq!(distance_km(40.0, -73.0, 40.1, -200.0), 0.0);
    }

    #[test]
    fn test_non_finite_coordinates_yield_zero() {
        assert_eq!(distance_km(f64::NAN, -73.0, 40.1, -73.1), 0.0);
        assert_eq!(distance_km(40.0, f64::INFINITY, 40.1, -73.1), 0.0);
    }
}

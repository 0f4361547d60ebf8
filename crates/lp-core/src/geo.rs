//! Great-circle distance and walking estimates

use crate::types::Coordinate;

/// Mean Earth radius used by the haversine formula
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Default walking speed for minute estimates
pub const WALK_SPEED_M_PER_MIN: f64 = 80.0;

/// Haversine distance in kilometers, unrounded
pub fn haversine_km(from: Coordinate, to: Coordinate) -> f64 {
    let d_lat = (to.lat - from.lat).to_radians();
    let d_lng = (to.lng - from.lng).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + from.lat.to_radians().cos() * to.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Distance in whole meters, rounded to nearest.
///
/// Inputs must be finite; non-finite coordinates are dropped upstream.
pub fn compute_distance(origin: Coordinate, place: Coordinate) -> u64 {
    (haversine_km(origin, place) * 1000.0).round() as u64
}

/// Estimated walking time, never less than one minute
pub fn walk_minutes(distance_meters: u64, speed_m_per_min: f64) -> u64 {
    let minutes = (distance_meters as f64 / speed_m_per_min).round() as u64;
    minutes.max(1)
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// Point `meters` due north of `origin`, measured along the meridian
    pub fn north_of(origin: Coordinate, meters: f64) -> Coordinate {
        let d_lat = (meters / (EARTH_RADIUS_KM * 1000.0)).to_degrees();
        Coordinate::new(origin.lat + d_lat, origin.lng)
    }
}

#[cfg(test)]
mod tests {
    use super::testing::north_of;
    use super::*;

    const OFFICE: Coordinate = Coordinate::new(37.50752, 127.055055);

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(compute_distance(OFFICE, OFFICE), 0);
        let elsewhere = Coordinate::new(-33.8688, 151.2093);
        assert_eq!(compute_distance(elsewhere, elsewhere), 0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = Coordinate::new(37.5080, 127.0555);
        let b = Coordinate::new(37.5651, 126.9895);
        assert_eq!(compute_distance(a, b), compute_distance(b, a));
        assert_eq!(compute_distance(OFFICE, a), compute_distance(a, OFFICE));
    }

    #[test]
    fn test_known_distances() {
        let nearby = Coordinate::new(37.5080, 127.0555);
        assert_eq!(compute_distance(OFFICE, nearby), 66);

        let city_hall = Coordinate::new(37.5665, 126.978);
        let cheonggye = Coordinate::new(37.5651, 126.9895);
        assert_eq!(compute_distance(city_hall, cheonggye), 1025);
    }

    #[test]
    fn test_distance_rounds_to_nearest_meter() {
        assert_eq!(compute_distance(OFFICE, north_of(OFFICE, 600.4)), 600);
        assert_eq!(compute_distance(OFFICE, north_of(OFFICE, 600.6)), 601);
    }

    #[test]
    fn test_walk_minutes() {
        assert_eq!(walk_minutes(0, WALK_SPEED_M_PER_MIN), 1);
        assert_eq!(walk_minutes(30, WALK_SPEED_M_PER_MIN), 1);
        assert_eq!(walk_minutes(400, WALK_SPEED_M_PER_MIN), 5);
        assert_eq!(walk_minutes(460, WALK_SPEED_M_PER_MIN), 6);
    }
}

//! Great-circle distance and elapsed time over ordered point sequences

use crate::NavigationPoint;

/// Earth's radius in meters
pub const EARTH_RADIUS_M: f64 = 6371000.0;

/// Round to 2 decimal places
#[inline]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Whether a coordinate value counts as present
///
/// Zero is treated as missing, so points exactly on the equator or the prime
/// meridian are dropped by the extractors and ignored by [`distance_between`].
#[inline]
pub fn is_usable_coordinate(value: f64) -> bool {
    value.is_finite() && value != 0.0
}

#[inline]
fn has_usable_position(point: &NavigationPoint) -> bool {
    is_usable_coordinate(point.latitude) && is_usable_coordinate(point.longitude)
}

/// Haversine distance in meters between two points
///
/// Returns 0 (and logs a warning) when either point lacks a usable position.
pub fn distance_between(a: &NavigationPoint, b: &NavigationPoint) -> f64 {
    if !has_usable_position(a) || !has_usable_position(b) {
        tracing::warn!(
            "Ignoring distance between ({}, {}) and ({}, {}): missing coordinate",
            a.latitude,
            a.longitude,
            b.latitude,
            b.longitude
        );
        return 0.0;
    }

    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let delta_lat = (b.latitude - a.latitude).to_radians();
    let delta_lon = (b.longitude - a.longitude).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

/// Sum of consecutive distances in meters, rounded to 2 decimals
pub fn total_distance(points: &[NavigationPoint]) -> f64 {
    #[cfg(feature = "profiling")]
    profiling::scope!("geometry::total_distance");
    let total: f64 = points
        .windows(2)
        .map(|pair| distance_between(&pair[0], &pair[1]))
        .sum();
    round2(total)
}

/// Numeric start time: the first point's timestamp, else the second's
pub fn effective_start_timestamp(points: &[NavigationPoint]) -> Option<f64> {
    points
        .iter()
        .take(2)
        .find_map(|point| point.timestamp_value().known())
}

/// Numeric end time: the last point's timestamp, else the second to last's
pub fn effective_end_timestamp(points: &[NavigationPoint]) -> Option<f64> {
    points
        .iter()
        .rev()
        .take(2)
        .find_map(|point| point.timestamp_value().known())
}

/// Time between the effective first and last timestamps, rounded to 2 decimals
///
/// Fewer than 2 points yield `Some(0.0)`. `None` means neither of the first two
/// (or neither of the last two) points carries a numeric timestamp.
pub fn elapsed_time(points: &[NavigationPoint]) -> Option<f64> {
    if points.len() < 2 {
        return Some(0.0);
    }
    let start = effective_start_timestamp(points)?;
    let end = effective_end_timestamp(points)?;
    let elapsed = end - start;
    if elapsed < 0.0 {
        tracing::debug!("Timestamps run backwards ({start} -> {end}), clamping travel time to 0");
        return Some(0.0);
    }
    Some(round2(elapsed))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timed(latitude: f64, longitude: f64, timestamp: &str) -> NavigationPoint {
        NavigationPoint::new(latitude, longitude).with_timestamp(timestamp)
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(1.234), 1.23);
        assert_eq!(round2(1.235_1), 1.24);
        assert_eq!(round2(0.0), 0.0);
    }

    #[test]
    fn test_distance_known_value() {
        // One degree of latitude along a meridian
        let a = NavigationPoint::new(10.0, 5.0);
        let b = NavigationPoint::new(11.0, 5.0);
        let expected = EARTH_RADIUS_M * 1.0_f64.to_radians();
        assert!((distance_between(&a, &b) - expected).abs() < 1e-6);
    }

    #[test]
    fn test_distance_with_missing_coordinate_is_zero() {
        let a = NavigationPoint::new(0.0, 5.0);
        let b = NavigationPoint::new(11.0, 5.0);
        assert_eq!(distance_between(&a, &b), 0.0);
    }

    #[test]
    fn test_total_distance_short_inputs() {
        assert_eq!(total_distance(&[]), 0.0);
        assert_eq!(total_distance(&[NavigationPoint::new(52.0, 4.0)]), 0.0);
    }

    #[test]
    fn test_total_distance_symmetric_under_reversal() {
        let points = vec![
            NavigationPoint::new(52.1, 4.9),
            NavigationPoint::new(52.2, 5.0),
            NavigationPoint::new(52.25, 5.3),
            NavigationPoint::new(52.0, 5.1),
        ];
        let mut reversed = points.clone();
        reversed.reverse();

        let forward = total_distance(&points);
        assert!(forward > 0.0);
        assert!((forward - total_distance(&reversed)).abs() <= 0.01);
    }

    #[test]
    fn test_elapsed_time_basic() {
        let points = vec![timed(52.0, 4.0, "1000"), timed(52.1, 4.1, "1060.5")];
        assert_eq!(elapsed_time(&points), Some(60.5));
    }

    #[test]
    fn test_elapsed_time_short_inputs() {
        assert_eq!(elapsed_time(&[]), Some(0.0));
        assert_eq!(elapsed_time(&[timed(52.0, 4.0, "5")]), Some(0.0));
    }

    #[test]
    fn test_elapsed_time_falls_back_to_neighbours() {
        let points = vec![
            timed(52.0, 4.0, "n/a"),
            timed(52.1, 4.1, "10"),
            timed(52.2, 4.2, "40"),
            NavigationPoint::new(52.3, 4.3),
        ];
        assert_eq!(effective_start_timestamp(&points), Some(10.0));
        assert_eq!(effective_end_timestamp(&points), Some(40.0));
        assert_eq!(elapsed_time(&points), Some(30.0));
    }

    #[test]
    fn test_elapsed_time_fails_when_pair_unknown() {
        let points = vec![
            NavigationPoint::new(52.0, 4.0),
            NavigationPoint::new(52.1, 4.1),
            timed(52.2, 4.2, "40"),
        ];
        assert_eq!(effective_start_timestamp(&points), None);
        assert_eq!(effective_end_timestamp(&points), Some(40.0));
        assert_eq!(elapsed_time(&points), None);
    }

    #[test]
    fn test_elapsed_time_ignores_duplicate_trailing_timestamp() {
        let points = vec![timed(52.0, 4.0, "100"), timed(52.1, 4.1, "250")];
        let mut extended = points.clone();
        extended.push(timed(52.2, 4.2, "250"));
        assert_eq!(elapsed_time(&points), elapsed_time(&extended));
    }
}

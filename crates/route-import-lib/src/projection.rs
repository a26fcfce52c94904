//! Display-oriented views of a parsed route
//!
//! All functions accept `Option<&Route>` so callers can pass `routes.first()`
//! straight through; a missing route yields empty output.

use crate::{GuidanceInstruction, NavigationPoint, Route, Summary};

/// All points in travel order, without the boundary point legs share
///
/// The first point of every leg after the first repeats the previous leg's last
/// point and is skipped.
pub fn flatten_points(route: Option<&Route>) -> Vec<&NavigationPoint> {
    let Some(route) = route else {
        return Vec::new();
    };
    route
        .legs
        .iter()
        .enumerate()
        .flat_map(|(index, leg)| leg.points.iter().skip(usize::from(index > 0)))
        .collect()
}

/// Departure, the start of every leg, and the final arrival
pub fn waypoints_of(route: Option<&Route>) -> Vec<&NavigationPoint> {
    let Some(route) = route else {
        return Vec::new();
    };
    let mut waypoints: Vec<&NavigationPoint> = route
        .legs
        .iter()
        .filter_map(|leg| leg.points.first())
        .collect();
    if let Some(arrival) = route.legs.last().and_then(|leg| leg.points.last()) {
        waypoints.push(arrival);
    }
    waypoints
}

/// Guidance instructions, empty for every format but structured JSON
pub fn instructions_of(route: Option<&Route>) -> &[GuidanceInstruction] {
    match route {
        Some(route) => &route.guidance.instructions,
        None => &[],
    }
}

pub fn summary_of(route: Option<&Route>) -> Option<&Summary> {
    route.map(|route| &route.summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RouteLeg;

    fn point(latitude: f64, longitude: f64) -> NavigationPoint {
        NavigationPoint::new(latitude, longitude)
    }

    fn leg(points: Vec<NavigationPoint>) -> RouteLeg {
        RouteLeg {
            points,
            summary: None,
        }
    }

    fn two_leg_route() -> Route {
        let mut route = Route::single_leg(Vec::new(), Summary::derived(10.0, 0.0));
        route.legs = vec![
            leg(vec![point(52.0, 4.0), point(52.1, 4.1), point(52.2, 4.2)]),
            leg(vec![point(52.2, 4.2), point(52.3, 4.3)]),
        ];
        route
    }

    #[test]
    fn test_flatten_drops_shared_boundary() {
        let route = two_leg_route();
        let points = flatten_points(Some(&route));

        assert_eq!(points.len(), 3 + 2 - 1);
        assert_eq!(points.iter().filter(|p| p.latitude == 52.2).count(), 1);
        assert_eq!(points.last().unwrap().latitude, 52.3);
    }

    #[test]
    fn test_waypoints() {
        let route = two_leg_route();
        let latitudes: Vec<f64> = waypoints_of(Some(&route))
            .iter()
            .map(|p| p.latitude)
            .collect();
        assert_eq!(latitudes, vec![52.0, 52.2, 52.3]);
    }

    #[test]
    fn test_single_point_route_waypoints() {
        let route = Route::single_leg(vec![point(52.0, 4.0)], Summary::default());
        assert_eq!(waypoints_of(Some(&route)).len(), 2);
        assert_eq!(flatten_points(Some(&route)).len(), 1);
    }

    #[test]
    fn test_missing_route_is_empty() {
        assert!(flatten_points(None).is_empty());
        assert!(waypoints_of(None).is_empty());
        assert!(instructions_of(None).is_empty());
        assert!(summary_of(None).is_none());
    }

    #[test]
    fn test_summary_and_instructions() {
        let route = two_leg_route();
        assert_eq!(summary_of(Some(&route)).unwrap().length_in_meters, 10.0);
        assert!(instructions_of(Some(&route)).is_empty());
    }
}

//! GPX export of parsed routes

use crate::{Result, Route};
use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use std::io::Write;

/// Convert a route into a GPX document with one track
///
/// Every leg becomes its own track segment. Source timestamps are opaque (not
/// wall-clock), so they are carried in each point's comment rather than its time.
/// GPX 1.1 has no speed element; speeds are not exported.
pub fn to_gpx(route: &Route, name: Option<&str>) -> Gpx {
    let mut track = Track::new();
    track.name = name.map(str::to_string);
    track.segments = route
        .legs
        .iter()
        .map(|leg| {
            let mut segment = TrackSegment::new();
            segment.points = leg
                .points
                .iter()
                .map(|point| {
                    let mut waypoint =
                        Waypoint::new(geo::Point::new(point.longitude, point.latitude));
                    waypoint.comment = point.timestamp.clone();
                    waypoint
                })
                .collect();
            segment
        })
        .collect();

    Gpx {
        version: GpxVersion::Gpx11,
        creator: Some(env!("CARGO_PKG_NAME").to_string()),
        tracks: vec![track],
        ..Default::default()
    }
}

/// Write a route as GPX 1.1
pub fn write_gpx<W: Write>(route: &Route, name: Option<&str>, writer: W) -> Result<()> {
    gpx::write(&to_gpx(route, name), writer)?;
    Ok(())
}

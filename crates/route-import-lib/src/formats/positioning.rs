//! Line-oriented positioning logs
//!
//! The first line is a versioned header. Every other non-comment line is a
//! comma-separated record with fixed column positions. Records belong to one of two
//! channels: `incoming` (raw locations fed to the positioning engine) and
//! `outgoing` (locations it produced). Only one channel ends up in the route.

use super::{Extraction, InputFormat};
use crate::{ImportError, NavigationPoint, Result, Route, Summary, geometry};
use std::collections::HashSet;
use std::fmt;

/// Literal start of the header line; the version follows it
pub const HEADER_PREFIX: &str = "BEGIN:ApplicationVersion=TomTom Positioning";
/// The only header version this extractor accepts
pub const SUPPORTED_VERSION: &str = "0.7";

/// Channel code of records fed into the positioning engine
pub const INCOMING_CHANNEL_CODE: &str = "245";
/// Channel code of records produced by the positioning engine
pub const OUTGOING_CHANNEL_CODE: &str = "345";

const COLUMN_TIMESTAMP: usize = 0;
const COLUMN_CHANNEL: usize = 1;
const COLUMN_LONGITUDE: usize = 3;
const COLUMN_LATITUDE: usize = 5;
const COLUMN_SPEED: usize = 11;

const FORMAT: InputFormat = InputFormat::PositioningLog;

/// One of the two parallel location streams of a positioning log
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Channel {
    Incoming,
    Outgoing,
}

impl Channel {
    fn from_code(code: &str) -> Option<Self> {
        match code {
            INCOMING_CHANNEL_CODE => Some(Channel::Incoming),
            OUTGOING_CHANNEL_CODE => Some(Channel::Outgoing),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Incoming => f.write_str("incoming"),
            Channel::Outgoing => f.write_str("outgoing"),
        }
    }
}

/// Points of one channel, de-duplicated by reception timestamp
#[derive(Debug, Default)]
struct ChannelPoints {
    seen: HashSet<String>,
    points: Vec<NavigationPoint>,
}

impl ChannelPoints {
    fn accept(&mut self, fields: &[&str]) {
        let Some(timestamp) = fields
            .get(COLUMN_TIMESTAMP)
            .copied()
            .filter(|t| !t.is_empty())
        else {
            return;
        };
        if is_zero_timestamp(timestamp) {
            return;
        }
        // Incomplete records still claim their timestamp, so a later duplicate
        // cannot sneak in under it.
        if !self.seen.insert(timestamp.to_string()) {
            return;
        }
        if let Some(point) = point_from_fields(timestamp, fields) {
            self.points.push(point);
        }
    }
}

fn is_zero_timestamp(timestamp: &str) -> bool {
    timestamp.parse::<f64>().is_ok_and(|value| value == 0.0)
}

fn numeric_field(fields: &[&str], index: usize) -> Option<f64> {
    fields
        .get(index)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn point_from_fields(timestamp: &str, fields: &[&str]) -> Option<NavigationPoint> {
    let longitude = numeric_field(fields, COLUMN_LONGITUDE)
        .filter(|value| geometry::is_usable_coordinate(*value))?;
    let latitude = numeric_field(fields, COLUMN_LATITUDE)
        .filter(|value| geometry::is_usable_coordinate(*value))?;
    let speed = numeric_field(fields, COLUMN_SPEED).filter(|value| *value >= 0.0)?;
    Some(
        NavigationPoint::new(latitude, longitude)
            .with_timestamp(timestamp)
            .with_speed(speed),
    )
}

/// Check the header line and return the version it declares
fn header_version(header: &str) -> Result<&str> {
    let header = header.trim_start_matches('\u{feff}').trim();
    header
        .strip_prefix(HEADER_PREFIX)
        .map(str::trim)
        .ok_or_else(|| ImportError::mismatch(FORMAT, "missing positioning header line"))
}

/// Pick the channel whose points make up the route
///
/// The channel with strictly more points wins; on a tie `incoming` wins.
/// Returns `None` when neither channel produced a point.
pub fn select_channel(
    outgoing: Vec<NavigationPoint>,
    incoming: Vec<NavigationPoint>,
) -> Option<(Channel, Vec<NavigationPoint>)> {
    match (outgoing.is_empty(), incoming.is_empty()) {
        (true, true) => None,
        (false, true) => Some((Channel::Outgoing, outgoing)),
        (true, false) => Some((Channel::Incoming, incoming)),
        (false, false) if outgoing.len() > incoming.len() => Some((Channel::Outgoing, outgoing)),
        (false, false) => Some((Channel::Incoming, incoming)),
    }
}

/// Parse a positioning log into a single-leg route with derived summary
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn extract(text: &str) -> Result<Extraction> {
    let mut lines = text.lines();
    let version = header_version(lines.next().unwrap_or_default())?;
    if version != SUPPORTED_VERSION {
        return Err(ImportError::UnsupportedVersion {
            format: FORMAT,
            found: version.to_string(),
            expected: SUPPORTED_VERSION,
        });
    }

    let mut incoming = ChannelPoints::default();
    let mut outgoing = ChannelPoints::default();
    for line in lines {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        match fields.get(COLUMN_CHANNEL).copied().and_then(Channel::from_code) {
            Some(Channel::Incoming) => incoming.accept(&fields),
            Some(Channel::Outgoing) => outgoing.accept(&fields),
            None => {}
        }
    }
    tracing::debug!(
        "Positioning log channels: {} incoming, {} outgoing points",
        incoming.points.len(),
        outgoing.points.len()
    );

    let (channel, points) = select_channel(outgoing.points, incoming.points)
        .ok_or(ImportError::NoUsableData { format: FORMAT })?;

    let length = geometry::total_distance(&points);
    let travel_time = geometry::elapsed_time(&points)
        .ok_or_else(|| ImportError::malformed(FORMAT, "no numeric timestamp at route start or end"))?;

    Ok(Extraction::single(
        FORMAT,
        Route::single_leg(points, Summary::derived(length, travel_time)),
        format!("using {channel} positioning data"),
    ))
}

//! Canonical route model
//!
//! Every extractor produces these types. Field names serialize in the camelCase
//! spelling of the structured JSON route format, so a parsed route can be written
//! back out in that format unchanged.

use crate::geometry;
use geo::{BoundingRect, Coord, LineString, Rect};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use serde_json::Value;

/// One sampled or derived position
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPoint {
    /// Opaque numeric-string identifier in source-defined units, not wall-clock time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// Meters per second, rounded to 2 decimals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<f64>,
}

/// Numeric reading of a point's timestamp
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TimestampValue {
    Known(f64),
    Unknown,
}

impl TimestampValue {
    /// The numeric value, if known
    pub fn known(self) -> Option<f64> {
        match self {
            TimestampValue::Known(value) => Some(value),
            TimestampValue::Unknown => None,
        }
    }
}

impl NavigationPoint {
    /// Create an untimed point without speed
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            timestamp: None,
            latitude,
            longitude,
            speed: None,
        }
    }

    /// Attach the source timestamp string
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }

    /// Attach a speed, rounded to 2 decimals
    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(geometry::round2(speed));
        self
    }

    /// Interpret the timestamp as a number
    pub fn timestamp_value(&self) -> TimestampValue {
        self.timestamp
            .as_deref()
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .filter(|value| value.is_finite())
            .map_or(TimestampValue::Unknown, TimestampValue::Known)
    }

    #[inline]
    fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

/// Length and travel time of a route or leg
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Summary {
    pub length_in_meters: f64,
    pub travel_time_in_seconds: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_delay_in_seconds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub traffic_length_in_meters: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
}

impl Summary {
    /// Summary computed from scratch; traffic and schedule fields stay empty
    pub fn derived(length_in_meters: f64, travel_time_in_seconds: f64) -> Self {
        Self {
            length_in_meters: geometry::round2(length_in_meters),
            travel_time_in_seconds: geometry::round2(travel_time_in_seconds),
            ..Default::default()
        }
    }
}

/// One contiguous segment of travel
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteLeg {
    #[serde(default)]
    pub points: Vec<NavigationPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<Summary>,
}

/// A maneuver description, only present in structured JSON input
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GuidanceInstruction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub driving_side: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maneuver: Option<String>,
    #[serde(alias = "point", skip_serializing_if = "Option::is_none")]
    pub maneuver_point: Option<NavigationPoint>,
    pub route_offset_in_meters: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub route_path: Vec<NavigationPoint>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Guidance {
    pub instructions: Vec<GuidanceInstruction>,
}

/// One complete trip
///
/// Immutable once an extractor hands it out; a new input replaces it wholesale.
///
/// A route read from structured JSON remembers the object it was read from and
/// serializes back to exactly that object, including fields this model does not
/// interpret.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    pub legs: Vec<RouteLeg>,
    pub summary: Summary,
    pub guidance: Guidance,
    source: Option<Value>,
}

/// Typed view of a route object; every part may be absent
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RouteFields {
    legs: Vec<RouteLeg>,
    summary: Summary,
    guidance: Guidance,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RouteFieldsRef<'a> {
    legs: &'a [RouteLeg],
    summary: &'a Summary,
    guidance: &'a Guidance,
}

impl Serialize for Route {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match &self.source {
            Some(source) => source.serialize(serializer),
            None => RouteFieldsRef {
                legs: &self.legs,
                summary: &self.summary,
                guidance: &self.guidance,
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for Route {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let source = Value::deserialize(deserializer)?;
        let fields = RouteFields::deserialize(&source).map_err(de::Error::custom)?;
        Ok(Self {
            legs: fields.legs,
            summary: fields.summary,
            guidance: fields.guidance,
            source: Some(source),
        })
    }
}

impl Route {
    /// Build a single-leg route with no guidance
    pub fn single_leg(points: Vec<NavigationPoint>, summary: Summary) -> Self {
        Self {
            legs: vec![RouteLeg {
                points,
                summary: None,
            }],
            summary,
            guidance: Guidance::default(),
            source: None,
        }
    }

    /// The route object as read from structured JSON, if it came from there
    pub fn source(&self) -> Option<&Value> {
        self.source.as_ref()
    }

    /// Total number of points across all legs, counting shared boundaries twice
    pub fn total_points(&self) -> usize {
        self.legs.iter().map(|leg| leg.points.len()).sum()
    }

    /// Bounding box in degrees (x = longitude, y = latitude)
    ///
    /// Returns `None` for a route without points.
    pub fn bounding_box(&self) -> Option<Rect<f64>> {
        let line: LineString<f64> = self
            .legs
            .iter()
            .flat_map(|leg| leg.points.iter().map(NavigationPoint::coord))
            .collect();
        line.bounding_rect()
    }
}

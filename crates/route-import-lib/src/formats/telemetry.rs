//! Header-driven delimited telemetry
//!
//! Column positions come from the header row, matched by name. The header must
//! name every configured column, which keeps comma-separated coordinate pastes
//! from being mistaken for telemetry.

use super::{Extraction, InputFormat};
use crate::{ImportError, NavigationPoint, Result, Route, Summary, TelemetryColumns, geometry};
use csv::{ReaderBuilder, StringRecord, Trim};

const FORMAT: InputFormat = InputFormat::DelimitedTelemetry;

/// Candidate field delimiters, most common first
const DELIMITERS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// Pick the delimiter that occurs most often in the header line
fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    DELIMITERS
        .into_iter()
        .rev()
        .max_by_key(|delimiter| header.bytes().filter(|b| b == delimiter).count())
        .unwrap_or(b',')
}

/// Resolved positions of the configured columns
struct ColumnIndices {
    latitude: usize,
    longitude: usize,
    timestamp: usize,
    speed: usize,
}

impl ColumnIndices {
    fn resolve(headers: &StringRecord, columns: &TelemetryColumns) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim_matches('"').eq_ignore_ascii_case(name))
                .ok_or_else(|| ImportError::mismatch(FORMAT, format!("no '{name}' column")))
        };
        Ok(Self {
            latitude: find(columns.latitude.as_str())?,
            longitude: find(columns.longitude.as_str())?,
            timestamp: find(columns.timestamp.as_str())?,
            speed: find(columns.speed.as_str())?,
        })
    }

    fn point(&self, row: &StringRecord) -> Option<NavigationPoint> {
        let number = |index: usize| {
            row.get(index)
                .filter(|value| !value.is_empty())
                .and_then(|value| value.parse::<f64>().ok())
        };
        let latitude = number(self.latitude).filter(|v| geometry::is_usable_coordinate(*v))?;
        let longitude = number(self.longitude).filter(|v| geometry::is_usable_coordinate(*v))?;
        let timestamp = row.get(self.timestamp).filter(|value| !value.is_empty())?;

        let point = NavigationPoint::new(latitude, longitude).with_timestamp(timestamp);
        Some(match number(self.speed).filter(|v| v.is_finite() && *v >= 0.0) {
            Some(speed) => point.with_speed(speed),
            None => point,
        })
    }
}

/// Parse telemetry rows into a single-leg route with derived summary
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn extract(text: &str, columns: &TelemetryColumns) -> Result<Extraction> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .delimiter(sniff_delimiter(text))
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .map_err(|err| ImportError::mismatch(FORMAT, err.to_string()))?
        .clone();
    let indices = ColumnIndices::resolve(&headers, columns)?;

    let mut points = Vec::new();
    let mut skipped = 0usize;
    for row in reader.records() {
        let row = row.map_err(|err| ImportError::malformed(FORMAT, err.to_string()))?;
        match indices.point(&row) {
            Some(point) => points.push(point),
            None => skipped += 1,
        }
    }
    if skipped > 0 {
        tracing::debug!("Skipped {skipped} telemetry rows without position or timestamp");
    }
    if points.is_empty() {
        return Err(ImportError::NoUsableData { format: FORMAT });
    }

    let length = geometry::total_distance(&points);
    let travel_time = geometry::elapsed_time(&points).ok_or_else(|| {
        ImportError::malformed(FORMAT, "no numeric timestamp at route start or end")
    })?;

    Ok(Extraction::single(
        FORMAT,
        Route::single_leg(points, Summary::derived(length, travel_time)),
        "using delimited telemetry data",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> TelemetryColumns {
        TelemetryColumns::default()
    }

    #[test]
    fn test_parses_rows_by_header_name() {
        let text = "speed,sourceTimestamp,longitude,latitude\n\
                    12.346,1000,4.0,52.0\n\
                    13,1010,4.01,52.01\n";
        let extraction = extract(text, &columns()).unwrap();

        let route = &extraction.routes[0];
        assert_eq!(extraction.message, "using delimited telemetry data");
        assert_eq!(route.legs.len(), 1);
        assert_eq!(route.legs[0].points.len(), 2);
        assert_eq!(route.legs[0].points[0].speed, Some(12.35));
        assert_eq!(route.legs[0].points[0].timestamp.as_deref(), Some("1000"));
        assert_eq!(route.summary.travel_time_in_seconds, 10.0);
        assert!(route.summary.length_in_meters > 1000.0);
    }

    #[test]
    fn test_rows_missing_required_fields_are_dropped() {
        let text = "latitude,longitude,sourceTimestamp,speed\n\
                    52.0,4.0,1,\n\
                    ,4.0,2,1\n\
                    52.1,0,3,1\n\
                    52.2,4.2,,1\n\
                    52.3,4.3,5,1\n";
        let extraction = extract(text, &columns()).unwrap();
        let points = &extraction.routes[0].legs[0].points;

        assert_eq!(points.len(), 2);
        assert_eq!(points[0].speed, None);
        assert_eq!(points[1].timestamp.as_deref(), Some("5"));
    }

    #[test]
    fn test_semicolon_delimiter_and_case_insensitive_headers() {
        let text = "Latitude;Longitude;SourceTimestamp;Speed\n52.0;4.0;1;2\n52.1;4.1;2;2\n";
        let extraction = extract(text, &columns()).unwrap();
        assert_eq!(extraction.routes[0].total_points(), 2);
    }

    #[test]
    fn test_custom_column_names() {
        let custom = TelemetryColumns {
            latitude: "lat".to_string(),
            longitude: "lon".to_string(),
            timestamp: "t".to_string(),
            speed: "v".to_string(),
        };
        let text = "t,lat,lon,v\n1,52.0,4.0,3\n";
        let extraction = extract(text, &custom).unwrap();
        assert_eq!(extraction.routes[0].summary.travel_time_in_seconds, 0.0);
    }

    #[test]
    fn test_pasted_coordinates_are_not_telemetry() {
        let err = extract("52.1, 4.9\n52.2, 5.0", &columns()).unwrap_err();
        assert!(matches!(err, ImportError::FormatMismatch { .. }));
    }

    #[test]
    fn test_header_only_is_no_data() {
        let err = extract("latitude,longitude,sourceTimestamp,speed\n", &columns()).unwrap_err();
        assert!(matches!(err, ImportError::NoUsableData { .. }));
    }

    #[test]
    fn test_non_numeric_endpoints_are_malformed() {
        let text = "latitude,longitude,sourceTimestamp,speed\n52.0,4.0,a,1\n52.1,4.1,b,1\n";
        let err = extract(text, &columns()).unwrap_err();
        assert!(matches!(err, ImportError::Malformed { .. }));
    }
}

//! Coordinates pasted as free text
//!
//! Four notations are recognized, tried from most to least explicit:
//!
//! 1. `GeoPoint(latitude = 52.1, longitude = 4.9)`
//! 2. `GeoPoint(52.1, 4.9)`
//! 3. `latitude: 52.1, longitude: 4.9` (also `lat=`/`lon=`, optionally quoted keys)
//! 4. `52.1, 4.9` or `52.1 4.9`
//!
//! The first notation with any match decides; a bare pair is also a substring
//! of every other notation, so the order matters.

use super::{Extraction, InputFormat};
use crate::{ImportError, NavigationPoint, Result, Route, Summary, geometry};
use once_cell::sync::Lazy;
use regex::Regex;

const FORMAT: InputFormat = InputFormat::FreeText;

const NUMBER: &str = r"[-+]?\d+(?:\.\d+)?";
/// A sign or a word boundary keeps the tail of a longer number from matching
const DECIMAL: &str = r"(?:[-+]|\b)\d{1,3}\.\d+";
const WRAPPER: &str = r"(?:GeoPoint|GeoCoordinate|Coordinate|LatLng|LatLon)\s*\(";
const LATITUDE_KEY: &str = r#""?lat(?:itude)?"?\s*[=:]\s*"#;
const LONGITUDE_KEY: &str = r#""?(?:lon|lng|longitude)"?\s*[=:]\s*"#;

static PATTERNS: Lazy<[Regex; 4]> = Lazy::new(|| {
    [
        format!(r"(?i){WRAPPER}\s*{LATITUDE_KEY}({NUMBER})\s*,\s*{LONGITUDE_KEY}({NUMBER})\s*\)"),
        format!(r"(?i){WRAPPER}\s*({NUMBER})\s*,\s*({NUMBER})\s*\)"),
        format!(r"(?i){LATITUDE_KEY}({NUMBER})\s*[,;]?\s*{LONGITUDE_KEY}({NUMBER})"),
        format!(r"({DECIMAL})\s*[,\s]\s*({DECIMAL})"),
    ]
    .map(|pattern| Regex::new(&pattern).expect("coordinate patterns are valid regexes"))
});

/// All `(latitude, longitude)` pairs of the first notation that matches at all
pub fn coordinate_pairs(text: &str) -> Vec<(f64, f64)> {
    for pattern in PATTERNS.iter() {
        let pairs: Vec<(f64, f64)> = pattern
            .captures_iter(text)
            .filter_map(|captures| {
                let latitude = captures.get(1)?.as_str().parse().ok()?;
                let longitude = captures.get(2)?.as_str().parse().ok()?;
                Some((latitude, longitude))
            })
            .collect();
        if !pairs.is_empty() {
            return pairs;
        }
    }
    Vec::new()
}

/// Build an untimed single-leg route from pasted coordinates
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn extract(text: &str) -> Result<Extraction> {
    let pairs = coordinate_pairs(text);
    if pairs.is_empty() {
        return Err(ImportError::mismatch(FORMAT, "no coordinates found"));
    }

    let points: Vec<NavigationPoint> = pairs
        .into_iter()
        .filter(|(latitude, longitude)| {
            geometry::is_usable_coordinate(*latitude) && geometry::is_usable_coordinate(*longitude)
        })
        .map(|(latitude, longitude)| NavigationPoint::new(latitude, longitude))
        .collect();
    if points.is_empty() {
        return Err(ImportError::NoUsableData { format: FORMAT });
    }

    // No timestamps in pasted text, so travel time stays 0
    let length = geometry::total_distance(&points);
    Ok(Extraction::single(
        FORMAT,
        Route::single_leg(points, Summary::derived(length, 0.0)),
        "using pasted coordinates",
    ))
}

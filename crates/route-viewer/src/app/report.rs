//! Text and JSON rendering of parse outcomes

use route_import_lib::{Extraction, ImportError, projection};
use serde_json::{Value, json};
use std::fmt;

/// One parsed (or failed) input
pub struct InputOutcome {
    /// File path or `<stdin>`
    pub source: String,
    pub result: Result<Extraction, ImportError>,
}

/// Human-readable summary of one outcome
impl fmt::Display for InputOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let extraction = match &self.result {
            Ok(extraction) => extraction,
            Err(err) => return writeln!(f, "{}: error: {err}", self.source),
        };

        let route = extraction.routes.first();
        writeln!(f, "{}: {}", self.source, extraction.message)?;
        writeln!(f, "  Format:       {}", extraction.format)?;
        writeln!(f, "  Routes:       {}", extraction.routes.len())?;
        writeln!(f, "  Legs:         {}", route.map_or(0, |r| r.legs.len()))?;
        writeln!(f, "  Points:       {}", projection::flatten_points(route).len())?;
        writeln!(f, "  Waypoints:    {}", projection::waypoints_of(route).len())?;
        writeln!(f, "  Instructions: {}", projection::instructions_of(route).len())?;
        if let Some(summary) = projection::summary_of(route) {
            writeln!(f, "  Length:       {:.2} m", summary.length_in_meters)?;
            writeln!(f, "  Travel time:  {:.2} s", summary.travel_time_in_seconds)?;
            if let Some(delay) = summary.traffic_delay_in_seconds {
                writeln!(f, "  Traffic:      {delay:.0} s delay")?;
            }
        }
        if let Some(bbox) = route.and_then(|r| r.bounding_box()) {
            writeln!(
                f,
                "  Bounds:       ({:.5}, {:.5}) - ({:.5}, {:.5})",
                bbox.min().y,
                bbox.min().x,
                bbox.max().y,
                bbox.max().x
            )?;
        }
        Ok(())
    }
}

/// JSON document for all outcomes
pub fn render_json(outcomes: &[InputOutcome]) -> Value {
    Value::Array(
        outcomes
            .iter()
            .map(|outcome| match &outcome.result {
                Ok(extraction) => json!({
                    "source": outcome.source,
                    "format": extraction.format,
                    "message": extraction.message,
                    "routes": extraction.routes,
                }),
                Err(err) => json!({
                    "source": outcome.source,
                    "error": err.to_string(),
                }),
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use route_import_lib::{ParserConfig, extract_routes};

    fn outcome(text: &str) -> InputOutcome {
        InputOutcome {
            source: "test".to_string(),
            result: extract_routes(text, &ParserConfig::default()),
        }
    }

    #[test]
    fn test_report_for_success() {
        let report = outcome("GeoPoint(52.1, 4.9) GeoPoint(52.2, 5.0)").to_string();
        assert!(report.starts_with("test: using pasted coordinates"));
        assert!(report.contains("Format:       free text"));
        assert!(report.contains("Points:       2"));
        assert!(report.contains("Travel time:  0.00 s"));
        assert!(report.contains("Bounds:       (52.10000, 4.90000)"));
    }

    #[test]
    fn test_report_for_failure() {
        let report = outcome("").to_string();
        assert_eq!(report, "test: error: Input is empty\n");
    }

    #[test]
    fn test_json_output() {
        let value = render_json(&[outcome("GeoPoint(52.1, 4.9)"), outcome("nothing")]);

        assert_eq!(value[0]["format"], "free-text");
        assert_eq!(value[0]["routes"][0]["legs"][0]["points"][0]["latitude"], 52.1);
        assert_eq!(value[1]["error"], "Could not parse input");
    }
}

//! Format-specific extractors
//!
//! Each extractor is a pure function from the raw text to an [`Extraction`], or an
//! [`ImportError`](crate::ImportError) saying why the text is not (usable) input of
//! that format. None of them depend on each other.

use crate::{ParserConfig, Result, Route};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

pub mod free_text;
pub mod positioning;
pub mod structured;
pub mod telemetry;

/// The recognized input formats
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputFormat {
    /// JSON route response with `formatVersion` and `routes`
    StructuredJson,
    /// Line-oriented positioning log with a versioned header line
    PositioningLog,
    /// Header-driven delimited telemetry rows
    DelimitedTelemetry,
    /// Coordinates pasted as free text
    FreeText,
}

impl InputFormat {
    pub const ALL: [InputFormat; 4] = [
        InputFormat::StructuredJson,
        InputFormat::PositioningLog,
        InputFormat::DelimitedTelemetry,
        InputFormat::FreeText,
    ];

    /// Run this format's extractor on `text`
    pub fn extract(self, text: &str, config: &ParserConfig) -> Result<Extraction> {
        match self {
            InputFormat::StructuredJson => structured::extract(text),
            InputFormat::PositioningLog => positioning::extract(text),
            InputFormat::DelimitedTelemetry => {
                telemetry::extract(text, &config.telemetry_columns)
            }
            InputFormat::FreeText => free_text::extract(text),
        }
    }

    /// Short name accepted by [`FromStr`]
    pub fn short_name(self) -> &'static str {
        match self {
            InputFormat::StructuredJson => "json",
            InputFormat::PositioningLog => "ttp",
            InputFormat::DelimitedTelemetry => "csv",
            InputFormat::FreeText => "text",
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InputFormat::StructuredJson => "structured JSON",
            InputFormat::PositioningLog => "positioning log",
            InputFormat::DelimitedTelemetry => "delimited telemetry",
            InputFormat::FreeText => "free text",
        };
        f.write_str(name)
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        InputFormat::ALL
            .into_iter()
            .find(|format| format.short_name() == wanted)
            .ok_or_else(|| {
                let names: Vec<&str> = InputFormat::ALL.iter().map(|f| f.short_name()).collect();
                format!("unknown format '{s}', expected one of: {}", names.join(", "))
            })
    }
}

/// Successful outcome of an extractor
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Extraction {
    /// Which extractor produced the routes
    pub format: InputFormat,
    /// Never empty
    pub routes: Vec<Route>,
    /// Human-readable description of what was used
    pub message: String,
}

impl Extraction {
    pub(crate) fn single(format: InputFormat, route: Route, message: impl Into<String>) -> Self {
        Self {
            format,
            routes: vec![route],
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_names_round_trip() {
        for format in InputFormat::ALL {
            assert_eq!(format.short_name().parse::<InputFormat>(), Ok(format));
        }
        assert_eq!(" JSON ".parse::<InputFormat>(), Ok(InputFormat::StructuredJson));
    }

    #[test]
    fn test_unknown_format_name() {
        let err = "gpx".parse::<InputFormat>().unwrap_err();
        assert!(err.contains("json, ttp, csv, text"));
    }
}

use clap::{Parser, ValueEnum};
use route_import_lib::{InputFormat, ParserConfig, TelemetryColumns};
use std::path::PathBuf;

/// How parsed inputs are printed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
    /// Human-readable summary per input
    #[default]
    Report,
    /// Canonical routes as JSON
    Json,
}

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Route Viewer - Inspect routes and telemetry logs pasted or loaded from files
pub struct Settings {
    /// Files to load (reads pasted text from stdin when none are given)
    #[clap(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Only try this format (json, ttp, csv, text) instead of detecting it
    #[clap(short, long)]
    pub format: Option<InputFormat>,

    /// Output mode
    #[clap(short, long, value_enum, default_value = "report")]
    pub output: OutputMode,

    /// Write the first parsed route to this GPX file
    #[clap(long, value_name = "FILE")]
    pub gpx_out: Option<PathBuf>,

    /// Keep trying other formats when a file has an unsupported format version
    #[clap(long, default_value = "false")]
    pub lenient_versions: bool,

    /// Latitude column name of delimited telemetry
    #[clap(long, default_value = "latitude")]
    pub latitude_column: String,

    /// Longitude column name of delimited telemetry
    #[clap(long, default_value = "longitude")]
    pub longitude_column: String,

    /// Timestamp column name of delimited telemetry
    #[clap(long, default_value = "sourceTimestamp")]
    pub timestamp_column: String,

    /// Speed column name of delimited telemetry
    #[clap(long, default_value = "speed")]
    pub speed_column: String,
}

impl Settings {
    /// Parse the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Dispatcher configuration for these settings
    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig {
            strict_versions: !self.lenient_versions,
            telemetry_columns: TelemetryColumns {
                latitude: self.latitude_column.clone(),
                longitude: self.longitude_column.clone(),
                timestamp: self.timestamp_column.clone(),
                speed: self.speed_column.clone(),
            },
            ..Default::default()
        }
    }
}

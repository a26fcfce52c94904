//! RouteSession - Holds the most recently parsed input
//!
//! Only the latest successful parse is kept. A new input replaces it wholesale;
//! an input that fails to parse leaves the previous route in place so the display
//! keeps showing something sensible.

use crate::{Extraction, InputFormat, ParserConfig, Result, extract_routes, projection};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Information about the currently loaded input
#[derive(Debug, Clone, PartialEq)]
pub struct SessionInfo {
    /// Format the input was recognized as
    pub format: InputFormat,
    /// Outcome message of the extractor
    pub message: String,
    /// Number of routes in the input
    pub route_count: usize,
    /// Number of legs of the first route
    pub leg_count: usize,
    /// Displayed points of the first route (shared leg boundaries counted once)
    pub point_count: usize,
    /// Length of the first route in meters
    pub length_in_meters: f64,
    /// Travel time of the first route in seconds
    pub travel_time_in_seconds: f64,
    /// Time spent recognizing and parsing the input
    pub parse_time: Duration,
}

#[derive(Debug)]
struct LoadedInput {
    extraction: Extraction,
    parse_time: Duration,
}

/// Keeps the most recent successful parse
#[derive(Debug, Default)]
pub struct RouteSession {
    config: ParserConfig,
    current: Option<LoadedInput>,
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl RouteSession {
    /// Create an empty session with the given parser configuration
    pub fn new(config: ParserConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    #[inline]
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse `text` and make it the current input on success
    pub fn load_text(&mut self, text: &str) -> Result<&Extraction> {
        let start = instant::Instant::now();
        let extraction = extract_routes(text, &self.config)?;
        let parse_time = start.elapsed();
        tracing::debug!("Parsed input in {:?}", parse_time);

        let loaded = self.current.insert(LoadedInput {
            extraction,
            parse_time,
        });
        Ok(&loaded.extraction)
    }

    /// Read a file and load its contents like pasted text
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&Extraction> {
        let text = std::fs::read_to_string(path.as_ref())?;
        self.load_text(&text)
    }

    /// The current input, if any parse has succeeded
    #[inline]
    pub fn current(&self) -> Option<&Extraction> {
        self.current.as_ref().map(|loaded| &loaded.extraction)
    }

    /// Drop the current input
    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Summary information about the current input
    pub fn info(&self) -> Option<SessionInfo> {
        let loaded = self.current.as_ref()?;
        let extraction = &loaded.extraction;
        let route = extraction.routes.first();
        let summary = projection::summary_of(route);
        Some(SessionInfo {
            format: extraction.format,
            message: extraction.message.clone(),
            route_count: extraction.routes.len(),
            leg_count: route.map_or(0, |route| route.legs.len()),
            point_count: projection::flatten_points(route).len(),
            length_in_meters: summary.map_or(0.0, |s| s.length_in_meters),
            travel_time_in_seconds: summary.map_or(0.0, |s| s.travel_time_in_seconds),
            parse_time: loaded.parse_time,
        })
    }
}

/// Read and parse several files independently, in parallel
///
/// Results come back in the order of `paths`; one failing file does not affect
/// the others.
pub fn parse_files<P: AsRef<Path> + Sync>(
    paths: &[P],
    config: &ParserConfig,
) -> Vec<(PathBuf, Result<Extraction>)> {
    #[cfg(feature = "profiling")]
    profiling::scope!("session::parse_files");

    paths
        .par_iter()
        .map(|path| {
            let path = path.as_ref();
            let result = std::fs::read_to_string(path)
                .map_err(Into::into)
                .and_then(|text| extract_routes(&text, config));
            (path.to_path_buf(), result)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImportError;

    const PASTED: &str = "GeoPoint(52.1, 4.9) GeoPoint(52.2, 5.0) GeoPoint(52.3, 5.1)";

    fn temp_file(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "route-import-lib-{}-{name}",
            std::process::id()
        ));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_session_creation() {
        let session = RouteSession::new(ParserConfig::default());
        assert!(session.current().is_none());
        assert!(session.info().is_none());
        assert!(session.config().strict_versions);
    }

    #[test]
    fn test_load_text() {
        let mut session = RouteSession::default();
        let extraction = session.load_text(PASTED).unwrap();
        assert_eq!(extraction.format, InputFormat::FreeText);

        let info = session.info().unwrap();
        assert_eq!(info.route_count, 1);
        assert_eq!(info.leg_count, 1);
        assert_eq!(info.point_count, 3);
        assert!(info.length_in_meters > 0.0);
        assert_eq!(info.travel_time_in_seconds, 0.0);
        assert_eq!(info.message, "using pasted coordinates");
    }

    #[test]
    fn test_new_input_replaces_previous() {
        let mut session = RouteSession::default();
        session.load_text(PASTED).unwrap();
        session.load_text("GeoPoint(52.1, 4.9)").unwrap();
        assert_eq!(session.info().unwrap().point_count, 1);
    }

    #[test]
    fn test_failed_input_keeps_previous() {
        let mut session = RouteSession::default();
        session.load_text(PASTED).unwrap();

        assert!(matches!(session.load_text(""), Err(ImportError::EmptyInput)));
        assert!(session.load_text("no coordinates").is_err());
        assert_eq!(session.info().unwrap().point_count, 3);

        session.clear();
        assert!(session.current().is_none());
    }

    #[test]
    fn test_load_file() {
        let path = temp_file("load.txt", PASTED);
        let mut session = RouteSession::default();
        assert!(session.load_file(&path).is_ok());
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            session.load_file(&path),
            Err(ImportError::Io(_))
        ));
    }

    #[test]
    fn test_parse_files_in_parallel() {
        let good = temp_file("good.txt", PASTED);
        let bad = temp_file("bad.txt", "nothing here");
        let results = parse_files(&[good.clone(), bad.clone()], &ParserConfig::default());

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].0, good);
        assert!(results[0].1.is_ok());
        assert!(matches!(results[1].1, Err(ImportError::Unrecognized)));

        std::fs::remove_file(good).unwrap();
        std::fs::remove_file(bad).unwrap();
    }
}

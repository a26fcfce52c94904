//! Route Import Library - Multi-format route parsing for the route viewer
//!
//! This library turns a pasted or loaded text blob into a canonical [`Route`] model,
//! deriving distance and travel time when the source format does not carry them.
//! It never touches the network or the filesystem on its own (except for the
//! explicit file helpers in [`session`]).
//!
//! # Architecture
//!
//! - **[`geometry`]**: Haversine distance and elapsed-time accumulation
//! - **[`formats`]**: One extractor per recognized input format
//! - **[`extract_routes`]**: Ordered fallback over the extractors
//! - **[`projection`]**: Display-oriented views of a parsed route
//! - **[`RouteSession`]**: Keeps the most recent successful parse
//!
//! # Example
//!
//! ```
//! use route_import_lib::{ParserConfig, extract_routes, projection};
//!
//! let text = "GeoPoint(latitude = 52.1, longitude = 4.9), GeoPoint(latitude = 52.2, longitude = 5.0)";
//! let extraction = extract_routes(text, &ParserConfig::default()).unwrap();
//! let points = projection::flatten_points(extraction.routes.first());
//! assert_eq!(points.len(), 2);
//! ```

mod dispatch;
pub mod export;
pub mod formats;
pub mod geometry;
mod model;
pub mod projection;
pub mod session;

// Public API exports
pub use dispatch::{ParserConfig, TelemetryColumns, extract_routes, extract_with};
pub use formats::{Extraction, InputFormat};
pub use model::{
    Guidance, GuidanceInstruction, NavigationPoint, Route, RouteLeg, Summary, TimestampValue,
};
pub use session::{RouteSession, SessionInfo};

/// Error types for route import
#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Input is not {format}: {reason}")]
    FormatMismatch { format: InputFormat, reason: String },

    #[error("Unsupported {format} version {found:?} (expected {expected:?})")]
    UnsupportedVersion {
        format: InputFormat,
        found: String,
        expected: &'static str,
    },

    #[error("No usable points in {format} input")]
    NoUsableData { format: InputFormat },

    #[error("Malformed {format} input: {reason}")]
    Malformed { format: InputFormat, reason: String },

    /// Recognized and versioned input whose contents cannot be used; never falls through
    #[error("Invalid {format} document: {reason}")]
    InvalidDocument { format: InputFormat, reason: String },

    #[error("Input is empty")]
    EmptyInput,

    #[error("Could not parse input")]
    Unrecognized,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GPX error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),
}

impl ImportError {
    /// Whether the dispatcher may move on to the next format after this error
    pub fn is_fallthrough(&self) -> bool {
        matches!(
            self,
            ImportError::FormatMismatch { .. }
                | ImportError::UnsupportedVersion { .. }
                | ImportError::NoUsableData { .. }
                | ImportError::Malformed { .. }
        )
    }

    pub(crate) fn mismatch(format: InputFormat, reason: impl Into<String>) -> Self {
        ImportError::FormatMismatch {
            format,
            reason: reason.into(),
        }
    }

    pub(crate) fn malformed(format: InputFormat, reason: impl Into<String>) -> Self {
        ImportError::Malformed {
            format,
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;

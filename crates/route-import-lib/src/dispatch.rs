//! Format sniffing by ordered fallback
//!
//! The dispatcher folds over the configured extractor order and returns the first
//! success. Extractors signal "not my format" through [`ImportError`] values, so no
//! failure ever escapes as a panic or aborts the remaining attempts unless it is
//! terminal.

use crate::{Extraction, ImportError, InputFormat, Result};

/// Header names of the delimited telemetry columns
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TelemetryColumns {
    pub latitude: String,
    pub longitude: String,
    pub timestamp: String,
    pub speed: String,
}

impl Default for TelemetryColumns {
    fn default() -> Self {
        Self {
            latitude: "latitude".to_string(),
            longitude: "longitude".to_string(),
            timestamp: "sourceTimestamp".to_string(),
            speed: "speed".to_string(),
        }
    }
}

/// Configuration for the format dispatcher
#[derive(Clone, Debug, PartialEq)]
pub struct ParserConfig {
    /// Extractors to try, in order
    pub order: Vec<InputFormat>,
    /// Stop at a recognized format with an unsupported version instead of trying
    /// the remaining formats
    pub strict_versions: bool,
    /// Column names for the delimited telemetry extractor
    pub telemetry_columns: TelemetryColumns,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            order: InputFormat::ALL.to_vec(),
            strict_versions: true,
            telemetry_columns: TelemetryColumns::default(),
        }
    }
}

/// Recognize `text` and extract its routes
///
/// Empty (or whitespace-only) input fails with [`ImportError::EmptyInput`] without
/// running any extractor. When no extractor accepts the text the result is
/// [`ImportError::Unrecognized`].
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn extract_routes(text: &str, config: &ParserConfig) -> Result<Extraction> {
    if text.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    for &format in &config.order {
        match format.extract(text, config) {
            Ok(extraction) => {
                tracing::info!(
                    "Parsed {} route(s) as {format}: {}",
                    extraction.routes.len(),
                    extraction.message
                );
                return Ok(extraction);
            }
            Err(err @ ImportError::UnsupportedVersion { .. }) if config.strict_versions => {
                tracing::warn!("{err}");
                return Err(err);
            }
            Err(err) if err.is_fallthrough() => {
                tracing::debug!("Not {format}: {err}");
            }
            Err(err) => return Err(err),
        }
    }

    tracing::debug!("No extractor accepted the input");
    Err(ImportError::Unrecognized)
}

/// Run a single extractor, without fallback
pub fn extract_with(format: InputFormat, text: &str, config: &ParserConfig) -> Result<Extraction> {
    if text.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }
    format.extract(text, config)
}

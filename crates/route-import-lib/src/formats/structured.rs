//! Structured JSON route responses

use super::{Extraction, InputFormat};
use crate::{ImportError, Result, Route};
use serde_json::Value;

/// The only `formatVersion` this extractor accepts
pub const SUPPORTED_FORMAT_VERSION: &str = "0.0.12";

const FORMAT: InputFormat = InputFormat::StructuredJson;

/// Take the `routes` array as-is; the source already carries correct summaries
///
/// Once the version and a non-empty `routes` array are confirmed the input is
/// this format, so a route that cannot be read is [`ImportError::InvalidDocument`]
/// rather than a reason to try other formats.
pub fn extract(text: &str) -> Result<Extraction> {
    let mut document: Value = serde_json::from_str(text)
        .map_err(|err| ImportError::mismatch(FORMAT, format!("invalid JSON: {err}")))?;

    let version = document
        .get("formatVersion")
        .and_then(Value::as_str)
        .ok_or_else(|| ImportError::mismatch(FORMAT, "no formatVersion field"))?;
    if version != SUPPORTED_FORMAT_VERSION {
        return Err(ImportError::UnsupportedVersion {
            format: FORMAT,
            found: version.to_string(),
            expected: SUPPORTED_FORMAT_VERSION,
        });
    }

    let routes = match document.get_mut("routes") {
        Some(Value::Array(routes)) if routes.is_empty() => {
            return Err(ImportError::NoUsableData { format: FORMAT });
        }
        Some(Value::Array(routes)) => std::mem::take(routes),
        _ => return Err(ImportError::mismatch(FORMAT, "no routes array")),
    };
    let routes: Vec<Route> = serde_json::from_value(Value::Array(routes)).map_err(|err| {
        ImportError::InvalidDocument {
            format: FORMAT,
            reason: err.to_string(),
        }
    })?;

    Ok(Extraction {
        format: FORMAT,
        routes,
        message: "using structured route data".to_string(),
    })
}

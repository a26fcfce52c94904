//! Application module
//!
//! Feeds raw text (files or stdin) to the route parser and prints what came out:
//! - Format detection through the parser's ordered fallback, or a forced format
//! - Parallel parsing when several files are given
//! - Text report or JSON output, optional GPX export of the first route

mod logging;
mod report;
pub mod settings;

use crate::app::report::InputOutcome;
use crate::app::settings::{OutputMode, Settings};
use route_import_lib::{ImportError, ParserConfig, RouteSession, export, extract_with, session};
use std::io::{BufWriter, Read, Write};

pub use logging::setup_logging;

/// Errors that end the application with a failure exit code
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{failed} of {total} inputs could not be parsed")]
    InputsFailed { failed: usize, total: usize },
}

/// Parse the configured inputs and print the result
pub fn run(settings: &Settings) -> Result<(), AppError> {
    let config = settings.parser_config();
    let outcomes = if settings.files.is_empty() {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        vec![parse_pasted(text, settings, &config)]
    } else {
        parse_files(settings, &config)
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match settings.output {
        OutputMode::Report => {
            for outcome in &outcomes {
                write!(out, "{outcome}")?;
            }
        }
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, &report::render_json(&outcomes))?;
            writeln!(out)?;
        }
    }

    if let Some(path) = &settings.gpx_out {
        let first = outcomes
            .iter()
            .find_map(|outcome| outcome.result.as_ref().ok()?.routes.first().map(|r| (outcome, r)));
        match first {
            Some((outcome, route)) => {
                let writer = BufWriter::new(std::fs::File::create(path)?);
                export::write_gpx(route, Some(outcome.source.as_str()), writer)?;
                tracing::info!("Wrote route from {} to {}", outcome.source, path.display());
            }
            None => tracing::warn!("No parsed route to write to {}", path.display()),
        }
    }

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    if failed > 0 {
        return Err(AppError::InputsFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

/// Parse text from stdin, the way a paste into the viewer is handled
fn parse_pasted(text: String, settings: &Settings, config: &ParserConfig) -> InputOutcome {
    let source = "<stdin>".to_string();
    if let Some(format) = settings.format {
        return InputOutcome {
            source,
            result: extract_with(format, &text, config),
        };
    }

    let mut session = RouteSession::new(config.clone());
    let result = session.load_text(&text).cloned();
    if let Some(info) = session.info() {
        tracing::info!(
            "Loaded {} point(s) as {} in {:?}",
            info.point_count,
            info.format,
            info.parse_time
        );
    }
    InputOutcome { source, result }
}

fn parse_files(settings: &Settings, config: &ParserConfig) -> Vec<InputOutcome> {
    match settings.format {
        Some(format) => settings
            .files
            .iter()
            .map(|path| InputOutcome {
                source: path.display().to_string(),
                result: std::fs::read_to_string(path)
                    .map_err(ImportError::from)
                    .and_then(|text| extract_with(format, &text, config)),
            })
            .collect(),
        None => session::parse_files(settings.files.as_slice(), config)
            .into_iter()
            .map(|(path, result)| InputOutcome {
                source: path.display().to_string(),
                result,
            })
            .collect(),
    }
}

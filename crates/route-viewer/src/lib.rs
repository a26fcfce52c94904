//! Route Viewer - Application Library
//!
//! Command-line front end of the route parser: it materializes text from files or
//! stdin, hands it to `route-import-lib`, and renders the outcome.

pub mod app;

pub use app::settings::Settings;
pub use app::{AppError, run, setup_logging};

//! Modular output system for the `dirscan` application.
//!
//! Each formatter takes a finished [`ScanReport`](crate::report::ScanReport)
//! and writes it to any `io::Write`. Formatters contain no business logic:
//! sorting and totals are already settled in the report.
//!
//! # Available Formatters
//!
//! - **Terminal**: Human-readable summary with per-user and per-extension listings
//! - **JSON**: The whole report, for scripting
//! - **CSV**: One row per (extension, user) pair, for spreadsheets

use crate::cli::ReportMode;

pub mod csv;
pub mod json;
pub mod terminal;

/// Controls what the terminal formatter prints.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Which listings to print
    pub mode: ReportMode,
    /// Print the nested breakdown under each group
    pub verbose: bool,
}

/// CSV output renderer function.
///
/// See [`csv::render`] for full documentation.
pub use self::csv::render as render_csv;

/// JSON output renderer function.
///
/// See [`json::render`] for full documentation.
pub use self::json::render as render_json;

/// Terminal output renderer function.
///
/// See [`terminal::render`] for full documentation.
pub use self::terminal::render as render_terminal;

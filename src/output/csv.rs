//! CSV output formatter for scan reports.
//!
//! Flattens the by-extension grouping into one row per (extension, user)
//! pair, in report order, for further processing or analysis.

use crate::report::ScanReport;
use crate::utils::human_readable_size;
use anyhow::Result;
use csv::Writer;
use std::io::Write;

/// A single record of output.
///
/// # Fields
/// * `extension` - Extension label (`.rs`, `binary`, ...)
/// * `user` - Owner name or numeric uid
/// * `size_bytes` - Bytes owned by `user` with this extension
/// * `size_human` - Human-readable size (e.g., "1.2 MiB")
/// * `files` - Number of files
/// * `average_bytes` - Average file size, rounded to two decimals
#[derive(Debug, serde::Serialize)]
pub struct CsvRow<'a> {
    pub extension: &'a str,
    pub user: &'a str,
    pub size_bytes: u64,
    pub size_human: String,
    pub files: u64,
    pub average_bytes: f64,
}

/// Renders the report to CSV.
///
/// # Arguments
/// * `report` - The finished scan report
/// * `out` - Destination, usually stdout
pub fn render<W: Write>(report: &ScanReport, out: W) -> Result<()> {
    let mut writer = Writer::from_writer(out);

    for group in &report.extensions {
        for share in &group.users {
            writer.serialize(CsvRow {
                extension: group.extension.as_str(),
                user: &share.user,
                size_bytes: share.size,
                size_human: human_readable_size(share.size),
                files: share.count,
                average_bytes: share.average_size(),
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}

//! JSON output formatter.

use crate::report::ScanReport;
use anyhow::Result;
use std::io::Write;

/// Writes the report as pretty-printed JSON followed by a newline.
pub fn render<W: Write>(report: &ScanReport, out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, report)?;
    writeln!(out)?;
    Ok(())
}

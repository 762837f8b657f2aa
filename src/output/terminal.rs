//! Terminal output formatter for scan reports.
//!
//! Prints the run totals, then the by-user and/or by-extension listings
//! selected by [`RenderOptions::mode`]. With [`RenderOptions::verbose`] each
//! group is followed by its nested breakdown.

use super::RenderOptions;
use crate::report::{RunTotals, ScanReport};
use crate::utils::{average_file_size, human_readable_size};
use anyhow::Result;
use std::io::Write;
use std::time::Duration;

/// Renders the report in human-readable form.
///
/// # Arguments
/// * `report` - The finished scan report, already sorted
/// * `options` - Listing mode and verbosity
/// * `out` - Destination, usually stdout
pub fn render<W: Write>(report: &ScanReport, options: &RenderOptions, out: &mut W) -> Result<()> {
    render_totals(&report.totals, out)?;

    if options.mode.shows_users() {
        writeln!(out)?;
        writeln!(out, "Consumption by user:")?;
        for user in &report.users {
            writeln!(
                out,
                "\t{}: Capacity: {}, #of files: {}, average file size: {}",
                user.user,
                human_readable_size(user.total_size),
                user.file_count,
                average_file_size(user.total_size, user.file_count)
            )?;
            if options.verbose {
                for ext in &user.extensions {
                    writeln!(
                        out,
                        "\t\t{}: {} #of files: {} average file size: {}",
                        ext.extension,
                        human_readable_size(ext.size),
                        ext.count,
                        average_file_size(ext.size, ext.count)
                    )?;
                }
            }
        }
    }

    if options.mode.shows_extensions() {
        writeln!(out)?;
        writeln!(out, "Consumption by file type/extension:")?;
        for group in &report.extensions {
            writeln!(
                out,
                "\t{}: {}, #of files {}, average filesize: {}",
                group.extension,
                human_readable_size(group.total_size),
                group.file_count,
                average_file_size(group.total_size, group.file_count)
            )?;
            if options.verbose {
                for share in &group.users {
                    writeln!(
                        out,
                        "\t\t{}: Capacity {}, #of files {}, average filesize: {}",
                        share.user,
                        human_readable_size(share.size),
                        share.count,
                        average_file_size(share.size, share.count)
                    )?;
                }
            }
        }
    }

    Ok(())
}

fn render_totals<W: Write>(totals: &RunTotals, out: &mut W) -> Result<()> {
    writeln!(
        out,
        "Total capacity: {} Total files: {}, Total directories: {}",
        human_readable_size(totals.total_capacity),
        totals.total_files,
        totals.total_directories
    )?;
    if totals.skipped_entries > 0 {
        writeln!(out, "Skipped entries: {}", totals.skipped_entries)?;
    }
    writeln!(
        out,
        "Total scanning time: {:?} ({:.0} files/second)",
        truncate_to_millis(totals.elapsed),
        totals.files_per_second()
    )?;
    Ok(())
}

fn truncate_to_millis(d: Duration) -> Duration {
    Duration::from_millis(d.as_millis() as u64)
}

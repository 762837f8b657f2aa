//! Utility functions for the `dirscan` tool.
//!
//! This module provides:
//! - Human-readable size formatting in binary units
//! - Average file size calculation
//! - File size extraction (apparent length or allocated blocks)
//! - Glob-based exclusion pattern parsing

use crate::cli::SizeMode;
use crate::error::{Result, ScanError};
use globset::{Glob, GlobSet, GlobSetBuilder};
use humansize::{BINARY, FormatSizeOptions, format_size};
use std::fs::Metadata;
use std::os::unix::fs::MetadataExt;

const UNIT: u64 = 1024;

/// Formats a byte count using binary (1024-based) units.
///
/// Values under 1024 are printed as a plain byte count (`"1023 B"`); larger
/// values get one decimal and a `KiB`..`EiB` suffix (`"1.5 KiB"`). A `u64`
/// tops out below 16 EiB, so the zetta range never applies.
///
/// # Examples
/// ```rust
/// use dirscan::utils::human_readable_size;
///
/// assert_eq!(human_readable_size(0), "0 B");
/// assert_eq!(human_readable_size(1024), "1.0 KiB");
/// ```
pub fn human_readable_size(size: u64) -> String {
    if size < UNIT {
        return format!("{} B", size);
    }
    let options = FormatSizeOptions::from(BINARY)
        .decimal_places(1)
        .decimal_zeroes(1);
    format_size(size, options)
}

/// Average size of `count` files totalling `size` bytes, rounded to two
/// decimal places.
///
/// # Returns
/// * `0.0` when `count` is zero
pub fn average_size(size: u64, count: u64) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let average = size as f64 / count as f64;
    (average * 100.0).round() / 100.0
}

/// Formats the average file size for display, truncated to whole bytes.
pub fn average_file_size(size: u64, count: u64) -> String {
    human_readable_size(average_size(size, count) as u64)
}

/// Returns the size of a file according to `mode`.
///
/// * `SizeMode::Apparent` - The file length as reported by `stat`
/// * `SizeMode::Allocated` - `st_blocks * 512`, the space used on disk, like `du`
pub fn file_size(metadata: &Metadata, mode: SizeMode) -> u64 {
    match mode {
        SizeMode::Apparent => metadata.len(),
        SizeMode::Allocated => metadata.blocks() * 512,
    }
}

/// Expands exclude patterns into common glob forms:
/// For example, "node_modules" becomes:
///   - `**/node_modules`
///   - `**/node_modules/**`
///     unless the pattern already includes glob symbols or extensions.
pub fn expand_exclude_patterns(patterns: &[String]) -> Vec<String> {
    let mut expanded = Vec::new();

    for pat in patterns {
        let pat = pat.trim();
        if pat.is_empty() {
            continue;
        }
        if pat.contains('*') || pat.ends_with('/') || pat.contains('.') {
            expanded.push(pat.to_string());
        } else {
            expanded.push(format!("**/{}", pat));
            expanded.push(format!("**/{}/**", pat));
        }
    }

    expanded
}

/// Compiles a list of glob patterns into a `GlobSet` matcher.
pub fn build_exclude_matcher(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        let glob = Glob::new(pattern).map_err(|source| ScanError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
        builder.add(glob);
    }
    builder.build().map_err(|source| ScanError::InvalidPattern {
        pattern: patterns.join(","),
        source,
    })
}

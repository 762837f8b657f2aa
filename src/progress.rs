//! Progress spinner shown while a scan runs.
//!
//! The walker calls [`report_progress`] periodically; everything else about
//! the spinner lives here so the scan code only ever sees a `ProgressBar`.
//! Tests and non-interactive output formats use [`ProgressBar::hidden`].

use crate::aggregate::CounterSnapshot;
use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner frames; indicatif shows the last one once the bar is finished.
const SPINNER_FRAMES: &[&str] = &["◐", "◓", "◑", "◒", "⚡", "✓"];

/// Creates the scan spinner, or a hidden bar when `enabled` is false.
pub fn scan_spinner(enabled: bool) -> Result<ProgressBar> {
    if !enabled {
        return Ok(ProgressBar::hidden());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(SPINNER_FRAMES)
            .template("{spinner} Scanning... {msg} [{elapsed}]")
            .context("Failed to set progress template")?,
    );
    pb.enable_steady_tick(Duration::from_millis(250));
    Ok(pb)
}

/// Updates the spinner message with the running counters.
pub fn report_progress(pb: &ProgressBar, snapshot: CounterSnapshot, elapsed: Duration) {
    if pb.is_hidden() {
        return;
    }
    let secs = elapsed.as_secs_f64();
    let rate = if secs > 0.0 {
        snapshot.files as f64 / secs
    } else {
        0.0
    };
    pb.set_message(format!(
        "Files scanned: {} Directories scanned: {} Rate: {:.0} files/second",
        snapshot.files, snapshot.directories, rate
    ));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_spinner_is_hidden() {
        let pb = scan_spinner(false).unwrap();
        assert!(pb.is_hidden());
        // Must be a no-op rather than a panic.
        report_progress(&pb, CounterSnapshot::default(), Duration::ZERO);
    }

    #[test]
    fn test_all_scan_frames_rotate_before_finish_frame() {
        let (finished, running) = SPINNER_FRAMES.split_last().unwrap();
        assert_eq!(*finished, "✓");
        assert_eq!(running, &["◐", "◓", "◑", "◒", "⚡"]);
    }

    #[test]
    fn test_enabled_spinner_builds() {
        let pb = scan_spinner(true).unwrap();
        pb.finish_and_clear();
    }
}

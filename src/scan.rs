//! File system scanning module for `dirscan`.
//!
//! This module handles:
//! - Recursive directory traversal using `WalkDir` (symlinks are never followed)
//! - Fan-out of regular-file paths to a fixed worker pool over a bounded channel
//! - Per-file observation: size, owner, and extension or content class
//! - Aggregation into the by-extension and by-user groupings
//! - Cooperative cancellation via [`CancelToken`]
//!
//! The main entry point is [`run_scan`]. The walker runs on the calling
//! thread and feeds file paths to `config.workers` workers; `run_scan`
//! returns only after every worker has drained the queue, so the report is
//! never built while aggregation is still in progress.

use crate::aggregate::{Aggregator, ScanCounters};
use crate::classify::classify;
use crate::cli::SizeMode;
use crate::config::{ScanConfig, validate_root};
use crate::data::{ExtensionLabel, FileObservation};
use crate::error::{Result, ScanError};
use crate::owner::OwnerResolver;
use crate::progress::report_progress;
use crate::report::ScanReport;
use crate::thread_pool::build_pool;
use crate::utils::file_size;
use chrono::Local;
use crossbeam_channel::{Receiver, Sender, bounded};
use indicatif::ProgressBar;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Paths buffered between the walker and the workers.
const QUEUE_DEPTH: usize = 4096;

/// Walker entries between two progress updates.
const PROGRESS_INTERVAL: u64 = 512;

/// Shared flag that asks a running scan to stop.
///
/// Clones share the same flag. The walker checks it before every entry and
/// each worker before every file, so a scan stops within one file operation
/// per thread.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Scans `config.root` and returns the sorted report.
///
/// # Arguments
/// * `config` - Validated scan settings
/// * `cancel` - Token checked throughout the scan
/// * `progress` - Spinner to update; pass `ProgressBar::hidden()` for none
///
/// # Errors
/// * [`ScanError::RootInaccessible`] / [`ScanError::NotADirectory`] before traversal starts
/// * [`ScanError::ThreadPool`] if the worker pool cannot be created
/// * [`ScanError::Cancelled`] if `cancel` fired; no partial report is returned
///
/// Unreadable entries, vanished files and unknown owners never fail the scan.
pub fn run_scan(
    config: &ScanConfig,
    cancel: &CancelToken,
    progress: &ProgressBar,
) -> Result<ScanReport> {
    validate_root(&config.root)?;
    let pool = build_pool(config.workers)?;

    info!(
        "Scanning directory {} with {} workers",
        config.root.display(),
        config.workers
    );

    let started_at = Local::now();
    let start = Instant::now();
    let aggregator = Aggregator::new();
    let owners = OwnerResolver::new();
    let (tx, rx) = bounded::<PathBuf>(QUEUE_DEPTH);

    pool.in_place_scope(|scope| {
        for _ in 0..config.workers {
            let rx = rx.clone();
            let aggregator = &aggregator;
            let owners = &owners;
            scope.spawn(move |_| {
                worker_loop(rx, config.size_mode, aggregator, owners, cancel);
            });
        }
        drop(rx);

        walk_tree(config, tx, aggregator.counters(), cancel, progress, start);
    });

    if cancel.is_cancelled() {
        warn!("Scan of {} interrupted", config.root.display());
        return Err(ScanError::Cancelled);
    }

    let elapsed = start.elapsed();
    debug!("Resolved {} distinct owners", owners.len());

    let (extensions, users, counters) = aggregator.into_groups();
    let report = ScanReport::new(
        config.root.clone(),
        config.workers,
        extensions,
        users,
        counters,
        started_at,
        elapsed,
    );
    debug_assert!(report.consistency_errors().is_empty());

    info!(
        "Scanned {} files and {} directories in {:?}",
        report.totals.total_files, report.totals.total_directories, elapsed
    );
    Ok(report)
}

/// Traverses the tree and sends regular-file paths to the workers.
///
/// Consumes `tx`; the channel closes when this returns, which is what lets
/// the workers finish.
fn walk_tree(
    config: &ScanConfig,
    tx: Sender<PathBuf>,
    counters: &ScanCounters,
    cancel: &CancelToken,
    progress: &ProgressBar,
    start: Instant,
) {
    let walker = WalkDir::new(&config.root)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !config.is_excluded(e.path()));

    let mut visited: u64 = 0;

    for entry in walker {
        if cancel.is_cancelled() {
            return;
        }

        visited += 1;
        if visited % PROGRESS_INTERVAL == 0 {
            report_progress(progress, counters.snapshot(), start.elapsed());
        }

        let entry = match entry {
            Ok(e) => e,
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default();
                debug!("Error walking {}: {}, skipping", path, err);
                counters.add_skipped();
                continue;
            }
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            continue;
        }
        if file_type.is_dir() {
            counters.add_directory();
            continue;
        }
        if !file_type.is_file() {
            debug!("Skipping special file {}", entry.path().display());
            continue;
        }

        if tx.send(entry.into_path()).is_err() {
            // Every worker has gone away, which only happens on cancellation.
            return;
        }
    }

    report_progress(progress, counters.snapshot(), start.elapsed());
}

/// Pulls paths until the channel is closed and drained, or the scan is cancelled.
fn worker_loop(
    rx: Receiver<PathBuf>,
    size_mode: SizeMode,
    aggregator: &Aggregator,
    owners: &OwnerResolver,
    cancel: &CancelToken,
) {
    for path in rx.iter() {
        if cancel.is_cancelled() {
            return;
        }
        match observe_file(path, size_mode, owners) {
            Some(observation) => aggregator.record(observation),
            None => aggregator.counters().add_skipped(),
        }
    }
}

/// Builds the observation for one regular file.
///
/// # Returns
/// * `None` if the file vanished or stopped being a regular file between
///   listing and stat; the caller counts it as skipped
pub fn observe_file(
    path: PathBuf,
    size_mode: SizeMode,
    owners: &OwnerResolver,
) -> Option<FileObservation> {
    let metadata = match std::fs::symlink_metadata(&path) {
        Ok(m) => m,
        Err(err) => {
            debug!("Error reading metadata of {}: {}, skipping", path.display(), err);
            return None;
        }
    };
    if !metadata.is_file() {
        debug!("{} is no longer a regular file, skipping", path.display());
        return None;
    }

    let label = extension_label(&path);
    let owner = owners.resolve(metadata.uid());
    let size = file_size(&metadata, size_mode);

    Some(FileObservation {
        path,
        size,
        owner,
        label,
    })
}

/// The suffix of `path`, or its sniffed content class when it has none.
pub fn extension_label(path: &Path) -> ExtensionLabel {
    ExtensionLabel::from_path(path).unwrap_or_else(|| classify(path))
}

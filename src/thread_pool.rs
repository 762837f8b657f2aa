//! Worker pool sizing and construction.
//!
//! The scan runs a fixed number of worker threads. The count comes from
//! `--workers` when given, otherwise from a [`WorkerStrategy`], and is always
//! clamped to `[1, 2 x CPU count]`.
//!
//! # Strategies
//! - `Default`: one worker per CPU
//! - `NumCpusMinus1`: number of CPUs minus 1 (leaves one CPU for the walker)
//! - `IoHeavy`: 2x CPU count, for slow or networked filesystems

use crate::error::Result;
use clap::ValueEnum;
use rayon::{ThreadPool, ThreadPoolBuilder};

/// Worker count heuristics.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug, Default)]
pub enum WorkerStrategy {
    /// One worker per CPU
    #[default]
    Default,
    /// Number of CPUs minus 1 (leaves one CPU free)
    NumCpusMinus1,
    /// Optimized for I/O-heavy workloads (2x CPU count)
    IoHeavy,
}

impl WorkerStrategy {
    /// Returns a string representation of the strategy for display purposes.
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkerStrategy::Default => "Default",
            WorkerStrategy::NumCpusMinus1 => "NumCpusMinus1",
            WorkerStrategy::IoHeavy => "IoHeavy",
        }
    }

    /// Worker count this strategy picks on a machine with `cpus` CPUs.
    pub fn worker_count(&self, cpus: usize) -> usize {
        match self {
            WorkerStrategy::Default => cpus,
            WorkerStrategy::NumCpusMinus1 => cpus.saturating_sub(1),
            WorkerStrategy::IoHeavy => cpus * 2,
        }
    }
}

/// Resolves the number of workers to run.
///
/// # Arguments
/// * `requested` - Explicit count from `--workers`, if any
/// * `strategy` - Heuristic used when `requested` is `None`
/// * `cpus` - Available CPUs
///
/// # Returns
/// A count in `[1, 2 * cpus]`.
pub fn resolve_worker_count(requested: Option<usize>, strategy: WorkerStrategy, cpus: usize) -> usize {
    let cpus = cpus.max(1);
    let wanted = requested.unwrap_or_else(|| strategy.worker_count(cpus));
    wanted.clamp(1, cpus * 2)
}

/// Builds a dedicated pool with exactly `workers` threads.
///
/// The pool is local to one scan; the global rayon pool is left alone so
/// that several scans (e.g. in tests) can use different sizes.
pub fn build_pool(workers: usize) -> Result<ThreadPool> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(workers)
        .thread_name(|i| format!("dirscan-worker-{}", i))
        .build()?;
    Ok(pool)
}

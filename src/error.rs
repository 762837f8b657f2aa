//! Error types for `dirscan`.
//!
//! Only conditions that stop a scan before or during traversal are errors.
//! Per-file problems (unreadable entries, vanished files, unknown owners)
//! are recovered where they happen and never surface here.

use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by the scanning library.
#[derive(Error, Debug)]
pub enum ScanError {
    /// The target directory does not exist or cannot be stat'ed.
    #[error("target directory {path} is not accessible: {source}")]
    RootInaccessible {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The target exists but is not a directory.
    #[error("target {0} is not a directory")]
    NotADirectory(PathBuf),

    /// An exclude pattern failed to compile.
    #[error("invalid exclude pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    /// The worker pool could not be created.
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    /// The scan was interrupted through its cancellation token.
    #[error("scan interrupted")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, ScanError>;

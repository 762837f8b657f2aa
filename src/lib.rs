//! Library crate for dirscan
//!
//! Walks a directory tree with a fixed pool of workers and summarises the
//! capacity it finds by file extension and by owning user.
//!
//! # Modules
//!
//! - [`scan`]: Tree traversal, worker pool and cancellation
//! - [`aggregate`]: Folding per-file observations into both groupings
//! - [`report`]: Sorted results and run totals
//! - [`classify`]: Binary/text sniffing for files without an extension
//! - [`owner`]: uid to user name resolution
//! - [`output`]: Terminal, JSON and CSV formatters
//! - [`config`], [`cli`]: Settings and their command-line form
//! - [`utils`]: Size formatting and exclusion helpers
//!
//! # Example
//!
//! ```rust,no_run
//! use dirscan::{CancelToken, ScanConfig, run_scan};
//! use indicatif::ProgressBar;
//!
//! let config = ScanConfig::new("/srv/data").with_workers(4);
//! let report = run_scan(&config, &CancelToken::new(), &ProgressBar::hidden())?;
//! for group in &report.extensions {
//!     println!("{}: {} files", group.extension, group.file_count);
//! }
//! # Ok::<(), dirscan::ScanError>(())
//! ```

pub mod aggregate;
pub mod classify;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod output;
pub mod owner;
pub mod progress;
pub mod report;
pub mod scan;
pub mod thread_pool;
pub mod utils;

pub use cli::Args;
pub use config::ScanConfig;
pub use data::{ExtensionLabel, FileObservation};
pub use error::ScanError;
pub use report::ScanReport;
pub use scan::{CancelToken, run_scan};

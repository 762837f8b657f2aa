//! CLI interface definitions for the `dirscan` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes:
//!
//! - [`Args`]: the main struct parsed from CLI inputs
//! - [`SizeMode`]: whether file sizes are apparent lengths or allocated blocks
//! - [`OutputFormat`]: how the final report is printed
//!
//! # Example
//!
//! ```bash
//! dirscan /home --workers 16 --verbose --exclude .git node_modules
//! ```

use crate::thread_pool::WorkerStrategy;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for the `dirscan` capacity report.
#[derive(Parser, Debug, Clone)]
#[command(name = "dirscan", author = "Sam Green", version, about)]
pub struct Args {
    /// Directory to scan (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Number of worker threads (default: one per CPU, at most 2x CPU count)
    #[arg(short = 'w', long, value_name = "N")]
    pub workers: Option<usize>,

    /// Worker count heuristic used when --workers is not given (hidden experimental flag)
    #[arg(long = "workers-strategy", value_enum, default_value_t = WorkerStrategy::Default, hide = true)]
    pub workers_strategy: WorkerStrategy,

    /// Enable verbose and detailed output
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Print only the file type/extension information
    #[arg(short = 'f', long, default_value_t = false, conflicts_with = "users_only")]
    pub extensions_only: bool,

    /// Print only the user information
    #[arg(short = 'u', long, default_value_t = false)]
    pub users_only: bool,

    /// Count apparent file length or space allocated on disk
    #[arg(long, value_enum, default_value_t = SizeMode::Apparent)]
    pub size: SizeMode,

    /// Exclude entries with matching names (e.g., '.git', 'node_modules')
    #[arg(long, value_name = "PATTERN", num_args = 1.., action = clap::ArgAction::Append)]
    pub exclude: Vec<String>,

    /// Skip pseudo-filesystems (/proc, /run, /sys, /dev)
    #[arg(long, default_value_t = false)]
    pub skip_pseudo_fs: bool,

    /// Report format written to stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Also append log records to dirscan.log in the log directory
    #[arg(short = 'l', long, default_value_t = false)]
    pub log: bool,

    /// Log file target directory
    #[arg(short = 't', long, value_name = "DIR", default_value = "/tmp")]
    pub log_dir: PathBuf,

    /// Print out the build information and exit
    #[arg(short = 'i', long, default_value_t = false)]
    pub build_info: bool,

    /// Disable the progress spinner
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
}

/// How a file's size is measured.
///
/// # Variants
/// * `Apparent` - The byte length of the file
/// * `Allocated` - Blocks allocated on disk (sparse files count less, small files more)
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug, Default)]
pub enum SizeMode {
    #[default]
    Apparent,
    Allocated,
}

/// Output format for the final report.
///
/// # Variants
/// * `Table` - Human-readable summary
/// * `Json` - The whole report as pretty-printed JSON
/// * `Csv` - One row per (extension, user) pair
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

/// Which grouping listings the table report contains.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum ReportMode {
    #[default]
    Both,
    ExtensionsOnly,
    UsersOnly,
}

impl ReportMode {
    pub fn shows_users(self) -> bool {
        self != ReportMode::ExtensionsOnly
    }

    pub fn shows_extensions(self) -> bool {
        self != ReportMode::UsersOnly
    }
}

impl Args {
    /// The listing mode selected by `--extensions-only` / `--users-only`.
    pub fn report_mode(&self) -> ReportMode {
        match (self.extensions_only, self.users_only) {
            (true, _) => ReportMode::ExtensionsOnly,
            (false, true) => ReportMode::UsersOnly,
            (false, false) => ReportMode::Both,
        }
    }
}

//! Validated scan configuration.
//!
//! [`ScanConfig`] is what the scanning library consumes. The binary builds
//! it from parsed [`Args`] with [`ScanConfig::from_args`]; tests and library
//! users build it directly with [`ScanConfig::new`] and the `with_*` setters.

use crate::cli::{Args, SizeMode};
use crate::error::{Result, ScanError};
use crate::thread_pool::{WorkerStrategy, resolve_worker_count};
use crate::utils::{build_exclude_matcher, expand_exclude_patterns};
use globset::GlobSet;
use std::path::{Path, PathBuf};

/// Pseudo-filesystems skipped by `--skip-pseudo-fs`.
pub const PSEUDO_FS_PREFIXES: &[&str] = &["/proc", "/run", "/sys", "/dev"];

/// Everything a scan needs to know, already validated.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Directory the walk starts from
    pub root: PathBuf,
    /// Number of worker threads, already clamped
    pub workers: usize,
    /// How file sizes are measured
    pub size_mode: SizeMode,
    /// Compiled exclusion globs
    pub exclude_matcher: GlobSet,
    /// Bare names excluded wherever they appear as a path component
    pub exclude_names: Vec<String>,
    /// Entries under these prefixes are neither counted nor descended into
    pub skip_prefixes: Vec<PathBuf>,
}

impl ScanConfig {
    /// A configuration with default settings for `root`.
    ///
    /// Does not check that `root` exists; [`crate::scan::run_scan`] does.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            workers: resolve_worker_count(None, WorkerStrategy::Default, num_cpus::get()),
            size_mode: SizeMode::Apparent,
            exclude_matcher: GlobSet::empty(),
            exclude_names: Vec::new(),
            skip_prefixes: Vec::new(),
        }
    }

    /// Builds and validates a configuration from command-line arguments.
    ///
    /// # Errors
    /// * [`ScanError::RootInaccessible`] / [`ScanError::NotADirectory`] for a bad target
    /// * [`ScanError::InvalidPattern`] for an exclude glob that does not compile
    pub fn from_args(args: &Args) -> Result<Self> {
        validate_root(&args.path)?;
        // Absolute, so that skip prefixes match a relative target like `.`.
        let root = std::fs::canonicalize(&args.path).map_err(|source| {
            ScanError::RootInaccessible {
                path: args.path.clone(),
                source,
            }
        })?;

        let workers = resolve_worker_count(args.workers, args.workers_strategy, num_cpus::get());
        let config = Self::new(root)
            .with_workers(workers)
            .with_size_mode(args.size)
            .with_excludes(&args.exclude)?;

        Ok(if args.skip_pseudo_fs {
            config.with_pseudo_fs_skipped()
        } else {
            config
        })
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_size_mode(mut self, mode: SizeMode) -> Self {
        self.size_mode = mode;
        self
    }

    /// Compiles `patterns` into the exclusion matcher.
    pub fn with_excludes(mut self, patterns: &[String]) -> Result<Self> {
        let expanded = expand_exclude_patterns(patterns);
        self.exclude_matcher = build_exclude_matcher(&expanded)?;
        self.exclude_names = patterns
            .iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        Ok(self)
    }

    pub fn with_skip_prefix(mut self, prefix: impl Into<PathBuf>) -> Self {
        self.skip_prefixes.push(prefix.into());
        self
    }

    pub fn with_pseudo_fs_skipped(self) -> Self {
        PSEUDO_FS_PREFIXES
            .iter()
            .fold(self, |config, prefix| config.with_skip_prefix(*prefix))
    }

    /// Whether an entry below the root is excluded from the scan.
    ///
    /// Skip prefixes are absolute. Globs and names are matched against the
    /// path relative to the root, so the root's own ancestors never match.
    pub fn is_excluded(&self, path: &Path) -> bool {
        if self.skip_prefixes.iter().any(|prefix| path.starts_with(prefix)) {
            return true;
        }
        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        self.exclude_matcher.is_match(relative)
            || relative
                .components()
                .any(|c| self.exclude_names.iter().any(|x| c.as_os_str() == x.as_str()))
    }
}

/// Checks that `root` exists and is a directory.
pub fn validate_root(root: &Path) -> Result<()> {
    let metadata = std::fs::metadata(root).map_err(|source| ScanError::RootInaccessible {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }
    Ok(())
}

//! Main entry point for the `dirscan` CLI application.
//!
//! `dirscan` walks a directory tree and reports how much space is used per
//! file extension and per owning user, with file counts and average sizes.
//!
//! # Responsibilities
//! - Parses CLI arguments via [`clap`] using the [`Args`] struct
//! - Sets up logging to stderr and, optionally, to `dirscan.log`
//! - Installs the interrupt handler that cancels a running scan
//! - Delegates traversal and aggregation to [`run_scan`]
//! - Prints the report as a table, JSON or CSV
//!
//! # Flags of Interest
//! - `--workers N`: Number of worker threads
//! - `--verbose`: Nested breakdowns and debug logging
//! - `--extensions-only` / `--users-only`: Limit the listings
//! - `--log`, `--log-dir DIR`: Append log records to `DIR/dirscan.log`

use anyhow::{Context, Result};
use clap::Parser;
use dirscan::cli::{Args, OutputFormat};
use dirscan::output::{RenderOptions, render_csv, render_json, render_terminal};
use dirscan::progress::scan_spinner;
use dirscan::{CancelToken, ScanConfig, ScanError, run_scan};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LOG_FILE_NAME: &str = "dirscan.log";

/// Exit status after an interrupt, as a shell reports SIGINT.
const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let args = Args::parse();

    if args.build_info {
        print_build_info();
        return ExitCode::SUCCESS;
    }

    // No subscriber yet, so this is the one error printed directly.
    if let Err(e) = setup_logging(&args) {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if matches!(e.downcast_ref::<ScanError>(), Some(ScanError::Cancelled)) => {
            eprintln!("Goodbye");
            ExitCode::from(EXIT_INTERRUPTED)
        }
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let config = ScanConfig::from_args(args).context("Invalid configuration")?;
    match args.workers {
        Some(_) => info!("Using {} workers", config.workers),
        None => info!(
            "Using {} strategy with {} workers",
            args.workers_strategy.as_str(),
            config.workers
        ),
    }

    let cancel = CancelToken::new();
    let handler_token = cancel.clone();
    ctrlc::set_handler(move || {
        eprintln!("\nReceived interrupt, quitting");
        handler_token.cancel();
    })
    .context("Failed to set signal handler")?;

    let progress = scan_spinner(!args.no_progress && args.format == OutputFormat::Table)?;
    let result = run_scan(&config, &cancel, &progress);
    progress.finish_and_clear();
    let report = result?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        OutputFormat::Table => {
            let options = RenderOptions {
                mode: args.report_mode(),
                verbose: args.verbose,
            };
            render_terminal(&report, &options, &mut out)?;
        }
        OutputFormat::Json => render_json(&report, &mut out)?,
        OutputFormat::Csv => render_csv(&report, &mut out)?,
    }
    out.flush()?;

    Ok(())
}

/// Installs the tracing subscriber.
///
/// Records go to stderr; with `--log` they are also appended, without
/// colours, to `dirscan.log` in `--log-dir`. `RUST_LOG` overrides the
/// default filter.
fn setup_logging(args: &Args) -> Result<()> {
    let default_filter = if args.verbose {
        "dirscan=debug,warn"
    } else {
        "dirscan=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_layer = if args.log {
        let path = args.log_dir.join(LOG_FILE_NAME);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .with_context(|| format!("Failed to open log file {}", path.display()))?;
        Some(
            fmt::layer()
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_writer(Arc::new(file)),
        )
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .with(file_layer)
        .try_init()
        .context("Failed to initialise logging")?;

    if args.log {
        info!(
            "Logging enabled. Please find the {} file located in {}",
            LOG_FILE_NAME,
            args.log_dir.display()
        );
    }
    Ok(())
}

/// Prints build metadata. Values not injected at compile time show as `unknown`.
fn print_build_info() {
    println!("Version:\t{}", env!("CARGO_PKG_VERSION"));
    println!(
        "Build date:\t{}",
        option_env!("DIRSCAN_BUILD_TIME").unwrap_or("unknown")
    );
    println!(
        "From branch:\t{}",
        option_env!("DIRSCAN_BUILD_BRANCH").unwrap_or("unknown")
    );
    println!(
        "With sha1:\t{}",
        option_env!("DIRSCAN_BUILD_SHA").unwrap_or("unknown")
    );
    println!(
        "On:\t\t{}/{}",
        std::env::consts::OS,
        std::env::consts::ARCH
    );
    println!(
        "Profile:\t{}",
        if cfg!(debug_assertions) {
            "debug"
        } else {
            "release"
        }
    );
}

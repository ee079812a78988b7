use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::Ordering;
use tracing::{info, warn};

use integrity_scanner_rs::core::pdf_validator::DEFAULT_PDF_PROBE;
use integrity_scanner_rs::logging;
use integrity_scanner_rs::pipeline::DEFAULT_PROGRESS_EVERY;
use integrity_scanner_rs::prelude::*;

#[derive(Parser)]
#[command(name = "integrity_scanner_rs")]
#[command(about = "Finds corrupt PDFs and images under a directory and deletes them", long_about = None)]
struct Cli {
    /// Root directory to scan recursively
    directory: PathBuf,

    /// Number of parallel validator threads (default: number of CPUs)
    #[arg(short, long)]
    workers: Option<usize>,

    /// External program used to probe PDFs; exit status 0 means valid
    #[arg(long, env = "INTEGRITY_PDF_PROBE", default_value = DEFAULT_PDF_PROBE)]
    pdf_probe: String,

    /// Report invalid files without deleting them
    #[arg(long)]
    dry_run: bool,

    /// Log a progress line every N processed files
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
    progress_every: u64,

    /// Write the final summary as JSON to this file
    #[arg(long)]
    summary_json: Option<PathBuf>,

    /// Also write the log to a timestamped file in this directory
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log filter, e.g. "info" or "debug" (default: RUST_LOG or info)
    #[arg(long)]
    log_level: Option<String>,

    /// Run in batch mode (no progress spinner)
    #[arg(long)]
    batch: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let _guard = logging::init_logger(cli.log_level.as_deref(), cli.log_dir.as_deref())?;

    let config = ScanConfig {
        root: cli.directory.clone(),
        workers: cli.workers,
        progress_every: cli.progress_every,
        policy: if cli.dry_run {
            RemediationPolicy::ReportOnly
        } else {
            RemediationPolicy::Delete
        },
    };
    let registry = ValidatorRegistry::standard(PdfValidator::with_command(cli.pdf_probe.as_str()));
    let scanner = Scanner::new(config, registry);

    // Set up graceful shutdown handler
    let shutdown_flag = scanner.cancel_flag();
    ctrlc::set_handler(move || {
        eprintln!("\n⚠️  Shutdown requested. Finishing current files...");
        shutdown_flag.store(true, Ordering::SeqCst);
    })
    .context("Error setting Ctrl-C handler")?;

    info!("Integrity Scanner (Rust Edition)");
    if cli.dry_run {
        info!("Dry run: invalid files will be reported, not deleted");
    }

    let reporter: Box<dyn ScanReporter> = if cli.batch {
        Box::new(TracingReporter)
    } else {
        Box::new(ProgressReporter::new(TracingReporter))
    };

    let summary = scanner
        .run(reporter)
        .with_context(|| format!("Scan of {} aborted", cli.directory.display()))?;

    if let Some(ref output) = cli.summary_json {
        write_summary(output, &summary)?;
        info!("Summary saved to: {}", output.display());
    }

    if summary.cancelled {
        warn!(
            "Graceful shutdown complete after {} files",
            summary.counters.processed()
        );
    }

    Ok(())
}

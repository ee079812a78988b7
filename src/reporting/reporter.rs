//! Scan event sinks
//!
//! A [`ScanReporter`] receives every event of one scan. The session owns it
//! for the duration of the scan and flushes it when the scan ends.

use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::pipeline::session::{ScanCounters, ScanSummary};
use crate::scanner::file_scanner::WalkError;

/// One observable step of a scan
#[derive(Debug)]
pub enum ScanEvent<'a> {
    Started {
        root: &'a Path,
    },
    Validated {
        path: &'a Path,
        kind: &'a str,
    },
    Deleted {
        path: &'a Path,
        kind: &'a str,
        reason: &'a str,
    },
    /// The validator could not judge the file; it is kept
    Inconclusive {
        path: &'a Path,
        kind: &'a str,
        reason: &'a str,
    },
    /// Invalid file left in place because deletion is disabled
    Retained {
        path: &'a Path,
        kind: &'a str,
        reason: &'a str,
    },
    DeleteFailed {
        path: &'a Path,
        kind: &'a str,
        error: &'a io::Error,
    },
    SubtreeSkipped {
        error: &'a WalkError,
    },
    Progress {
        counters: ScanCounters,
    },
    Finished {
        summary: &'a ScanSummary,
    },
}

pub trait ScanReporter: Send {
    fn report(&mut self, event: &ScanEvent<'_>);

    /// Release buffered output. Called exactly once when the session ends.
    fn flush(&mut self) {}
}

/// Writes every event as a `tracing` line
#[derive(Debug, Default)]
pub struct TracingReporter;

impl ScanReporter for TracingReporter {
    fn report(&mut self, event: &ScanEvent<'_>) {
        match event {
            ScanEvent::Started { root } => {
                info!(root = %root.display(), "Scanning directory: {}", root.display());
            }
            ScanEvent::Validated { path, .. } => {
                info!("Validated: {}", path.display());
            }
            ScanEvent::Deleted { path, kind, reason } => {
                info!(%reason, "Deleted corrupted or invalid {}: {}", kind, path.display());
            }
            ScanEvent::Inconclusive { path, kind, reason } => {
                warn!(%reason, "Could not verify {}, keeping: {}", kind, path.display());
            }
            ScanEvent::Retained { path, kind, reason } => {
                info!(%reason, "Would delete corrupted or invalid {}: {}", kind, path.display());
            }
            ScanEvent::DeleteFailed { path, kind, error } => {
                warn!(%error, "Failed to delete invalid {}: {}", kind, path.display());
            }
            ScanEvent::SubtreeSkipped { error } => {
                warn!(path = %error.path().display(), "Skipping unreadable directory: {}", error);
            }
            ScanEvent::Progress { counters } => {
                info!(
                    processed = counters.processed(),
                    invalid = counters.invalid(),
                    deleted = counters.deleted(),
                    "{}",
                    counters
                );
            }
            ScanEvent::Finished { summary } => {
                if summary.cancelled {
                    warn!("Scan cancelled before completion.");
                } else {
                    info!("Scan complete.");
                }
                if summary.delete_failures > 0
                    || summary.skipped_subtrees > 0
                    || summary.inconclusive > 0
                {
                    warn!(
                        delete_failures = summary.delete_failures,
                        inconclusive = summary.inconclusive,
                        skipped_subtrees = summary.skipped_subtrees,
                        "Some files or directories could not be handled"
                    );
                }
                info!(
                    processed = summary.counters.processed(),
                    invalid = summary.counters.invalid(),
                    deleted = summary.counters.deleted(),
                    elapsed_secs = summary.elapsed_secs,
                    "{}",
                    summary.counters
                );
            }
        }
    }
}

/// Drives an `indicatif` spinner from scan events and forwards them on
pub struct ProgressReporter<R> {
    inner: R,
    bar: ProgressBar,
    invalid: u64,
    deleted: u64,
}

impl<R: ScanReporter> ProgressReporter<R> {
    pub fn new(inner: R) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(style) =
            ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")
        {
            bar.set_style(style);
        }
        bar.enable_steady_tick(Duration::from_millis(120));
        Self {
            inner,
            bar,
            invalid: 0,
            deleted: 0,
        }
    }

    /// Forwards events without drawing anything
    pub fn hidden(inner: R) -> Self {
        Self {
            inner,
            bar: ProgressBar::hidden(),
            invalid: 0,
            deleted: 0,
        }
    }
}

impl<R: ScanReporter> ScanReporter for ProgressReporter<R> {
    fn report(&mut self, event: &ScanEvent<'_>) {
        let checked = match event {
            ScanEvent::Validated { .. } | ScanEvent::Inconclusive { .. } => true,
            ScanEvent::Deleted { .. } => {
                self.invalid += 1;
                self.deleted += 1;
                true
            }
            ScanEvent::Retained { .. } | ScanEvent::DeleteFailed { .. } => {
                self.invalid += 1;
                true
            }
            ScanEvent::Finished { .. } => {
                self.bar.finish_and_clear();
                false
            }
            _ => false,
        };
        if checked {
            self.bar.inc(1);
            self.bar.set_message(format!(
                "{} files checked | {} invalid | {} deleted",
                self.bar.position(),
                self.invalid,
                self.deleted
            ));
        }
        let inner = &mut self.inner;
        self.bar.suspend(|| inner.report(event));
    }

    fn flush(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
        self.inner.flush();
    }
}

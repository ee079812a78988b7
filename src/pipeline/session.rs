//! Per-scan counters and reporting state

use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::reporting::reporter::{ScanEvent, ScanReporter};
use crate::scanner::file_scanner::WalkError;

/// Default number of processed files between progress snapshots
pub const DEFAULT_PROGRESS_EVERY: u64 = 1000;

/// Running totals of one scan.
///
/// `deleted <= invalid <= processed` holds after every method call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScanCounters {
    processed: u64,
    invalid: u64,
    deleted: u64,
}

impl ScanCounters {
    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn invalid(&self) -> u64 {
        self.invalid
    }

    pub fn deleted(&self) -> u64 {
        self.deleted
    }

    pub(crate) fn record_valid(&mut self) {
        self.processed += 1;
    }

    pub(crate) fn record_invalid(&mut self) {
        self.processed += 1;
        self.invalid += 1;
    }

    /// Must follow the `record_invalid` of the same file
    pub(crate) fn record_deleted(&mut self) {
        debug_assert!(self.deleted < self.invalid);
        self.deleted += 1;
    }
}

impl fmt::Display for ScanCounters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Processed: {} files | Invalid files found: {} | Files deleted: {}",
            self.processed, self.invalid, self.deleted
        )
    }
}

/// Final state of a scan, as printed and optionally written to disk
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    pub root: PathBuf,
    #[serde(flatten)]
    pub counters: ScanCounters,
    pub delete_failures: u64,
    /// Files kept because their validator could not judge them
    pub inconclusive: u64,
    pub skipped_subtrees: u64,
    pub cancelled: bool,
    pub elapsed_secs: f64,
}

/// Counters and reporter for exactly one scan.
///
/// The reporter is flushed when the session finishes, or on drop if the
/// scan is abandoned early.
pub struct ScanSession {
    root: PathBuf,
    counters: ScanCounters,
    delete_failures: u64,
    inconclusive: u64,
    skipped_subtrees: u64,
    progress_every: u64,
    started: Instant,
    reporter: Box<dyn ScanReporter>,
    closed: bool,
}

impl ScanSession {
    pub fn start(root: &Path, progress_every: u64, mut reporter: Box<dyn ScanReporter>) -> Self {
        reporter.report(&ScanEvent::Started { root });
        Self {
            root: root.to_path_buf(),
            counters: ScanCounters::default(),
            delete_failures: 0,
            inconclusive: 0,
            skipped_subtrees: 0,
            progress_every: progress_every.max(1),
            started: Instant::now(),
            reporter,
            closed: false,
        }
    }

    pub fn counters(&self) -> ScanCounters {
        self.counters
    }

    pub fn delete_failures(&self) -> u64 {
        self.delete_failures
    }

    pub fn inconclusive(&self) -> u64 {
        self.inconclusive
    }

    pub fn skipped_subtrees(&self) -> u64 {
        self.skipped_subtrees
    }

    pub(crate) fn counters_mut(&mut self) -> &mut ScanCounters {
        &mut self.counters
    }

    pub(crate) fn record_delete_failure(&mut self) {
        self.delete_failures += 1;
    }

    pub(crate) fn record_inconclusive(&mut self) {
        self.inconclusive += 1;
    }

    pub fn report(&mut self, event: &ScanEvent<'_>) {
        self.reporter.report(event);
    }

    pub fn record_skipped_subtree(&mut self, error: &WalkError) {
        self.skipped_subtrees += 1;
        self.reporter.report(&ScanEvent::SubtreeSkipped { error });
    }

    /// Emit a progress snapshot when `processed` reaches the next multiple
    /// of the interval. Call once after each remediated file.
    pub fn tick(&mut self) {
        let processed = self.counters.processed;
        if processed > 0 && processed % self.progress_every == 0 {
            self.reporter.report(&ScanEvent::Progress {
                counters: self.counters,
            });
        }
    }

    /// Close the session: emit the final summary and flush the reporter
    pub fn finish(mut self, cancelled: bool) -> ScanSummary {
        let summary = ScanSummary {
            root: self.root.clone(),
            counters: self.counters,
            delete_failures: self.delete_failures,
            inconclusive: self.inconclusive,
            skipped_subtrees: self.skipped_subtrees,
            cancelled,
            elapsed_secs: self.started.elapsed().as_secs_f64(),
        };
        self.reporter.report(&ScanEvent::Finished { summary: &summary });
        self.reporter.flush();
        self.closed = true;
        summary
    }
}

impl Drop for ScanSession {
    fn drop(&mut self) {
        if !self.closed {
            self.reporter.flush();
        }
    }
}

//! Wires walker, registry, validators and remediator into one scan

use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

use crate::core::registry::ValidatorRegistry;
use crate::error::ScanError;
use crate::reporting::reporter::ScanReporter;
use crate::scanner::file_scanner::{walk, FileCandidate, WalkError};

use super::remediator::{RemediationPolicy, Remediator};
use super::session::{ScanSession, ScanSummary, DEFAULT_PROGRESS_EVERY};

/// Settings for one scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    pub root: PathBuf,
    /// Validator worker threads; `None` uses one per CPU
    pub workers: Option<usize>,
    pub progress_every: u64,
    pub policy: RemediationPolicy,
}

impl ScanConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            workers: None,
            progress_every: DEFAULT_PROGRESS_EVERY,
            policy: RemediationPolicy::Delete,
        }
    }
}

/// Runs scans of a directory tree against a fixed validator registry
pub struct Scanner {
    config: ScanConfig,
    registry: ValidatorRegistry,
    cancel: Arc<AtomicBool>,
}

impl Scanner {
    pub fn new(config: ScanConfig, registry: ValidatorRegistry) -> Self {
        Self {
            config,
            registry,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Flag that stops the scan between files once set
    pub fn cancel_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Scan the configured root.
    ///
    /// Fails before touching any file if the root cannot be read or a
    /// validator's tool is missing. A tool that disappears mid-scan stops
    /// the scan as well; every other problem is counted and logged.
    pub fn run(&self, reporter: Box<dyn ScanReporter>) -> Result<ScanSummary, ScanError> {
        let root = self.config.root.as_path();
        check_root(root)?;
        self.registry.preflight()?;

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.workers.unwrap_or(0))
            .build()?;
        debug!(workers = pool.current_num_threads(), "worker pool ready");

        let session = Mutex::new(ScanSession::start(
            root,
            self.config.progress_every,
            reporter,
        ));
        let remediator = Remediator::new(self.config.policy);
        let cancel = self.cancel.as_ref();

        let result = pool.install(|| {
            walk(root)
                .take_while(|_| !cancel.load(Ordering::SeqCst))
                .par_bridge()
                .try_for_each(|item| self.process(item, &remediator, &session))
        });

        let session = session.into_inner().unwrap_or_else(PoisonError::into_inner);
        let summary = session.finish(cancel.load(Ordering::SeqCst));
        result.map(|()| summary)
    }

    fn process(
        &self,
        item: Result<FileCandidate, WalkError>,
        remediator: &Remediator,
        session: &Mutex<ScanSession>,
    ) -> Result<(), ScanError> {
        if self.cancel.load(Ordering::SeqCst) {
            return Ok(());
        }

        let candidate = match item {
            Ok(candidate) => candidate,
            Err(error) => {
                lock(session).record_skipped_subtree(&error);
                return Ok(());
            }
        };

        let Some(validator) = self.registry.resolve(candidate.extension()) else {
            return Ok(());
        };

        let outcome = match validator.validate(candidate.path()) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.cancel.store(true, Ordering::SeqCst);
                return Err(e.into());
            }
        };

        let mut session = lock(session);
        remediator.remediate(&candidate, validator.kind(), &outcome, &mut session);
        session.tick();
        Ok(())
    }
}

fn lock(session: &Mutex<ScanSession>) -> std::sync::MutexGuard<'_, ScanSession> {
    session.lock().unwrap_or_else(PoisonError::into_inner)
}

fn check_root(root: &Path) -> Result<(), ScanError> {
    let inaccessible = |source: io::Error| ScanError::RootInaccessible {
        root: root.to_path_buf(),
        source,
    };
    let metadata = fs::metadata(root).map_err(inaccessible)?;
    if !metadata.is_dir() {
        return Err(inaccessible(io::Error::new(
            io::ErrorKind::InvalidInput,
            "not a directory",
        )));
    }
    fs::read_dir(root).map_err(inaccessible)?;
    Ok(())
}

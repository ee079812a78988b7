//! Turns validation outcomes into deletions and counter updates

use std::fs;

use crate::core::validator::ValidationOutcome;
use crate::reporting::reporter::ScanEvent;
use crate::scanner::file_scanner::FileCandidate;

use super::session::ScanSession;

/// What to do with files judged invalid
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum RemediationPolicy {
    #[default]
    Delete,
    /// Count and log invalid files but leave them on disk
    ReportOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemediationResult {
    Kept,
    Deleted,
    /// Deletion was attempted and failed; the scan carries on
    DeleteFailed,
    /// Invalid, but the policy forbids deletion
    Retained,
}

/// The only component that removes files
#[derive(Debug, Default, Clone, Copy)]
pub struct Remediator {
    policy: RemediationPolicy,
}

impl Remediator {
    pub fn new(policy: RemediationPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RemediationPolicy {
        self.policy
    }

    /// Apply `outcome` to `candidate`. One deletion attempt at most, no retry.
    pub fn remediate(
        &self,
        candidate: &FileCandidate,
        kind: &str,
        outcome: &ValidationOutcome,
        session: &mut ScanSession,
    ) -> RemediationResult {
        let path = candidate.path();

        let reason = match outcome {
            ValidationOutcome::Valid => {
                session.counters_mut().record_valid();
                session.report(&ScanEvent::Validated { path, kind });
                return RemediationResult::Kept;
            }
            ValidationOutcome::Inconclusive { reason } => {
                session.counters_mut().record_valid();
                session.record_inconclusive();
                session.report(&ScanEvent::Inconclusive { path, kind, reason });
                return RemediationResult::Kept;
            }
            ValidationOutcome::Invalid { reason } => reason.as_str(),
        };

        session.counters_mut().record_invalid();

        if self.policy == RemediationPolicy::ReportOnly {
            session.report(&ScanEvent::Retained { path, kind, reason });
            return RemediationResult::Retained;
        }

        match fs::remove_file(path) {
            Ok(()) => {
                session.counters_mut().record_deleted();
                session.report(&ScanEvent::Deleted { path, kind, reason });
                RemediationResult::Deleted
            }
            Err(error) => {
                session.record_delete_failure();
                session.report(&ScanEvent::DeleteFailed {
                    path,
                    kind,
                    error: &error,
                });
                RemediationResult::DeleteFailed
            }
        }
    }
}

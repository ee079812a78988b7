//! The scan pipeline: session state, remediation and orchestration

pub mod session;
pub mod remediator;
pub mod orchestrator;

pub use orchestrator::{ScanConfig, Scanner};
pub use remediator::{RemediationPolicy, RemediationResult, Remediator};
pub use session::{ScanCounters, ScanSession, ScanSummary, DEFAULT_PROGRESS_EVERY};

//! File Integrity Scanner Library
//!
//! Walks a directory tree, validates PDFs and raster images with
//! format-specific validators, and deletes the files that fail.

pub mod core;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod reporting;
pub mod scanner;

pub use crate::core::validator;
pub use crate::reporting::report_writer;
pub use crate::scanner::file_scanner;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::{
        CommandProbe, ImageValidator, PdfProbe, PdfValidator, ProbeStatus, ValidationOutcome,
        Validator, ValidatorError, ValidatorRegistry,
    };
    pub use crate::error::ScanError;
    pub use crate::pipeline::{
        RemediationPolicy, RemediationResult, Remediator, ScanConfig, ScanCounters, ScanSession,
        ScanSummary, Scanner,
    };
    pub use crate::reporting::{
        write_summary, ProgressReporter, ScanEvent, ScanReporter, TracingReporter,
    };
    pub use crate::scanner::file_scanner::{walk, FileCandidate, WalkError};
}
